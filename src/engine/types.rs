use crate::error::{PaletteError, Result};
use crate::model::ColorRuleResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Image bytes plus the file name sent in the multipart `image` field.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self { file_name, bytes })
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub base_url: String,
    pub reachable: bool,
    pub http_status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Decodes a success body. Anything that is not exactly the result shape,
/// including out-of-range percentages, is an analysis failure.
pub fn decode_result(body: &[u8]) -> Result<ColorRuleResult> {
    let result: ColorRuleResult = serde_json::from_slice(body)
        .map_err(|e| PaletteError::AnalysisFailed(format!("malformed response: {e}")))?;
    result.validate()?;
    Ok(result)
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: Service,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub labeling: Labeling,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub test_id: String,
}
impl Default for Service {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            timeout_seconds: 60,
            test_id: crate::model::RULE_60_30_10.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_image_bytes: u64,
}
impl Default for Limits {
    fn default() -> Self {
        Self {
            max_image_bytes: 20 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Labeling {
    pub default_color: String,
    pub export_filename: String,
    pub image_extensions: Vec<String>,
    pub normalize_names: bool,
}
impl Default for Labeling {
    fn default() -> Self {
        Self {
            default_color: "#ffffff".into(),
            export_filename: "result.json".into(),
            image_extensions: ["png", "jpg", "jpeg", "webp", "bmp", "gif"]
                .into_iter()
                .map(String::from)
                .collect(),
            normalize_names: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub json: bool,
    pub color_swatches: bool,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            json: false,
            color_swatches: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}

use crate::error::Result;
use crate::label::LabeledImage;
use std::path::Path;

/// Serializes the labeled set as a JSON array in store order.
pub fn to_json(entries: &[LabeledImage]) -> Result<String> {
    Ok(serde_json::to_string(entries)?)
}

/// Writes a fresh artifact, replacing whatever the file held before.
pub fn write_file(path: &Path, entries: &[LabeledImage]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_json(entries)?)?;
    Ok(())
}

pub fn from_json(raw: &str) -> Result<Vec<LabeledImage>> {
    Ok(serde_json::from_str(raw)?)
}

pub fn read_file(path: &Path) -> Result<Vec<LabeledImage>> {
    let raw = std::fs::read_to_string(path)?;
    from_json(&raw)
}

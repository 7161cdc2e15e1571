use crate::config::Config;
use crate::error::{PaletteError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    pub name: String,
    pub path: PathBuf,
}

impl ImageHandle {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Images from one directory selection plus the current selection.
///
/// `selected` is `Some(i)` with `i < images.len()` whenever the batch is
/// non-empty, and `None` otherwise.
#[derive(Debug, Clone, Default)]
pub struct LabelBatch {
    images: Vec<ImageHandle>,
    selected: Option<usize>,
}

impl LabelBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the batch entirely; nothing from the previous one survives.
    pub fn load(&mut self, files: Vec<ImageHandle>) {
        self.selected = if files.is_empty() { None } else { Some(0) };
        self.images = files;
    }

    pub fn select(&mut self, index: usize) -> Result<&ImageHandle> {
        let len = self.images.len();
        if index >= len {
            return Err(PaletteError::IndexOutOfRange { index, len });
        }
        self.selected = Some(index);
        Ok(&self.images[index])
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&ImageHandle> {
        self.selected.map(|i| &self.images[i])
    }

    pub fn images(&self) -> &[ImageHandle] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Lists the image files directly inside `dir`, sorted by name.
pub fn scan_dir(cfg: &Config, dir: &Path) -> Result<Vec<ImageHandle>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || !has_image_extension(cfg, &path) {
            continue;
        }
        let Some(raw) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        let name = if cfg.labeling.normalize_names {
            raw.nfc().collect::<String>()
        } else {
            raw
        };
        out.push(ImageHandle { name, path });
    }
    out.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("scanned {} images in {}", out.len(), dir.display());
    Ok(out)
}

fn has_image_extension(cfg: &Config, path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    cfg.labeling
        .image_extensions
        .iter()
        .any(|e| e.eq_ignore_ascii_case(ext))
}

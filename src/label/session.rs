use super::batch::{ImageHandle, LabelBatch};
use super::editor::LabelEditor;
use super::store::LabelStore;
use super::types::{HexColor, LabeledImage};
use crate::error::{PaletteError, Result};
use crate::export;
use crate::model::Role;
use std::path::Path;
use tracing::{debug, info};

/// One labeling session. Owns the batch, the pickers and the labeled set;
/// all mutation goes through the methods below.
#[derive(Debug, Clone, Default)]
pub struct LabelSession {
    batch: LabelBatch,
    editor: LabelEditor,
    store: LabelStore,
}

impl LabelSession {
    pub fn new(default_color: HexColor) -> Self {
        Self {
            batch: LabelBatch::new(),
            editor: LabelEditor::new(default_color),
            store: LabelStore::new(),
        }
    }

    /// Replaces the batch and refreshes the pickers for the first image.
    /// Labels saved so far are kept.
    pub fn load(&mut self, files: Vec<ImageHandle>) {
        self.batch.load(files);
        match self.batch.selected() {
            Some(handle) => self.editor.refresh(&handle.name, &self.store),
            None => self.editor.reset(),
        }
        info!("loaded batch of {} images", self.batch.len());
    }

    pub fn select(&mut self, index: usize) -> Result<&ImageHandle> {
        let handle = self.batch.select(index)?;
        self.editor.refresh(&handle.name, &self.store);
        debug!("selected {index}: {}", handle.name);
        Ok(handle)
    }

    pub fn set_color(&mut self, role: Role, color: HexColor) {
        self.editor.set(role, color);
    }

    /// Stores the current picker values for the selected image.
    pub fn save(&mut self) -> Result<&LabeledImage> {
        let handle = self.batch.selected().ok_or(PaletteError::NoImageSelected)?;
        let pickers = self.editor.pickers().clone();
        let entry = self.store.save(
            &handle.name,
            pickers.primary,
            pickers.secondary,
            pickers.accent,
        );
        info!("saved labels for {}", entry.name);
        Ok(entry)
    }

    pub fn export(&self) -> Result<String> {
        export::to_json(self.store.entries())
    }

    pub fn export_to(&self, path: &Path) -> Result<()> {
        export::write_file(path, self.store.entries())?;
        info!("exported {} labels to {}", self.store.len(), path.display());
        Ok(())
    }

    pub fn batch(&self) -> &LabelBatch {
        &self.batch
    }

    pub fn editor(&self) -> &LabelEditor {
        &self.editor
    }

    pub fn store(&self) -> &LabelStore {
        &self.store
    }
}

use super::store::LabelStore;
use super::types::{HexColor, LabelColors};
use crate::model::Role;

/// The three color pickers bound to the selected image.
#[derive(Debug, Clone)]
pub struct LabelEditor {
    default_color: HexColor,
    pickers: LabelColors,
}

impl LabelEditor {
    pub fn new(default_color: HexColor) -> Self {
        Self {
            pickers: LabelColors::uniform(default_color.clone()),
            default_color,
        }
    }

    /// Re-initializes every picker for `name`: the saved colors when the image
    /// is already labeled, the default color otherwise. Unsaved edits are
    /// discarded.
    pub fn refresh(&mut self, name: &str, store: &LabelStore) {
        self.pickers = match store.find(name) {
            Some(entry) => entry.color.clone(),
            None => LabelColors::uniform(self.default_color.clone()),
        };
    }

    pub fn reset(&mut self) {
        self.pickers = LabelColors::uniform(self.default_color.clone());
    }

    pub fn set(&mut self, role: Role, color: HexColor) {
        self.pickers.set(role, color);
    }

    pub fn get(&self, role: Role) -> &HexColor {
        self.pickers.get(role)
    }

    pub fn pickers(&self) -> &LabelColors {
        &self.pickers
    }

    pub fn default_color(&self) -> &HexColor {
        &self.default_color
    }
}

impl Default for LabelEditor {
    fn default() -> Self {
        Self::new(HexColor::white())
    }
}

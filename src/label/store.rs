use super::types::{HexColor, LabelColors, LabeledImage};

/// Labeled images in first-insertion order, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelStore {
    entries: Vec<LabeledImage>,
}

impl LabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<LabeledImage>) -> Self {
        let mut store = Self::new();
        for e in entries {
            store.upsert(e.name, e.color);
        }
        store
    }

    /// Upsert: overwrite the colors in place when `name` exists, append
    /// otherwise.
    pub fn save(
        &mut self,
        name: &str,
        primary: HexColor,
        secondary: HexColor,
        accent: HexColor,
    ) -> &LabeledImage {
        self.upsert(
            name.to_string(),
            LabelColors {
                primary,
                secondary,
                accent,
            },
        )
    }

    fn upsert(&mut self, name: String, color: LabelColors) -> &LabeledImage {
        let index = match self.position(&name) {
            Some(i) => {
                self.entries[i].color = color;
                i
            }
            None => {
                self.entries.push(LabeledImage { name, color });
                self.entries.len() - 1
            }
        };
        &self.entries[index]
    }

    pub fn find(&self, name: &str) -> Option<&LabeledImage> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    pub fn entries(&self) -> &[LabeledImage] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

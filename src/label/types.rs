use crate::error::{PaletteError, Result};
use crate::model::{Color, Role};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})$").expect("static hex color regex")
});

/// Labeling-side color, always held as lowercase `#rrggbb`.
///
/// Kept apart from [`Color`]; the two meet only through the explicit
/// conversions below.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn white() -> Self {
        Self("#ffffff".to_string())
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let caps = HEX_RE
            .captures(raw)
            .ok_or_else(|| PaletteError::InvalidHexColor(raw.to_string()))?;
        let digits = caps[1].to_ascii_lowercase();
        let full: String = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits
        };
        Ok(Self(format!("#{full}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_color(&self) -> Color {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        Color::new(channel(1), channel(3), channel(5))
    }
}

impl From<Color> for HexColor {
    fn from(c: Color) -> Self {
        Self(format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b))
    }
}

impl FromStr for HexColor {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = PaletteError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelColors {
    pub primary: HexColor,
    pub secondary: HexColor,
    pub accent: HexColor,
}

impl LabelColors {
    pub fn uniform(color: HexColor) -> Self {
        Self {
            primary: color.clone(),
            secondary: color.clone(),
            accent: color,
        }
    }

    pub fn get(&self, role: Role) -> &HexColor {
        match role {
            Role::Primary => &self.primary,
            Role::Secondary => &self.secondary,
            Role::Accent => &self.accent,
        }
    }

    pub fn set(&mut self, role: Role, color: HexColor) {
        match role {
            Role::Primary => self.primary = color,
            Role::Secondary => self.secondary = color,
            Role::Accent => self.accent = color,
        }
    }
}

/// One manually labeled image. `name` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledImage {
    pub name: String,
    pub color: LabelColors,
}

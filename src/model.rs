use crate::error::{PaletteError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the 60-30-10 rule test, also the service endpoint path.
pub const RULE_60_30_10: &str = "603010";

/// One RGB sample as returned by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorShare {
    pub color: Color,
    pub percentage: f64,
}

impl ColorShare {
    pub fn is_in_range(&self) -> bool {
        self.percentage.is_finite() && (0.0..=100.0).contains(&self.percentage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDetails {
    pub primary_ok: bool,
    pub secondary_ok: bool,
    pub accent_ok: bool,
}

impl RuleDetails {
    pub fn all_ok(&self) -> bool {
        self.primary_ok && self.secondary_ok && self.accent_ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Primary,
    Secondary,
    Accent,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Primary, Role::Secondary, Role::Accent];

    pub fn label(self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Secondary => "secondary",
            Role::Accent => "accent",
        }
    }
}

/// Verdict of the 60-30-10 rule for one image.
///
/// Treated as an immutable value once received. `rule_followed` is carried
/// exactly as the service reported it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRuleResult {
    pub primary_color: ColorShare,
    pub secondary_color: ColorShare,
    pub accent_color: ColorShare,
    pub rule_followed: bool,
    pub details: RuleDetails,
}

impl ColorRuleResult {
    pub fn share(&self, role: Role) -> &ColorShare {
        match role {
            Role::Primary => &self.primary_color,
            Role::Secondary => &self.secondary_color,
            Role::Accent => &self.accent_color,
        }
    }

    pub fn role_ok(&self, role: Role) -> bool {
        match role {
            Role::Primary => self.details.primary_ok,
            Role::Secondary => self.details.secondary_ok,
            Role::Accent => self.details.accent_ok,
        }
    }

    /// Checks the percentage range of every share. Channel ranges are
    /// already enforced by `u8` at decode time.
    pub fn validate(&self) -> Result<()> {
        for role in Role::ALL {
            let share = self.share(role);
            if !share.is_in_range() {
                return Err(PaletteError::AnalysisFailed(format!(
                    "{} percentage out of range: {}",
                    role.label(),
                    share.percentage
                )));
            }
        }
        Ok(())
    }

    /// True when `rule_followed` agrees with the per-role flags.
    pub fn is_consistent(&self) -> bool {
        self.rule_followed == self.details.all_ok()
    }
}

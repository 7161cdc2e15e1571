use crate::model::{Color, ColorRuleResult, Role};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Machine-readable record of one `check` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub test_id: String,
    pub image: String,
    pub image_sha256: String,
    pub checked_at: String,
    pub result: ColorRuleResult,
}

fn yes_no(b: bool) -> &'static str {
    if b { "Yes" } else { "No" }
}

fn title(role: Role) -> &'static str {
    match role {
        Role::Primary => "Primary color",
        Role::Secondary => "Secondary color",
        Role::Accent => "Accent color",
    }
}

/// Two-space block painted with a 24-bit background.
pub fn swatch(c: Color) -> String {
    format!("\x1b[48;2;{};{};{}m  \x1b[0m", c.r, c.g, c.b)
}

/// Heading shown before any verdict exists.
pub fn render_empty(test_id: &str) -> String {
    format!("{} color test: no result yet\n", heading(test_id))
}

/// Renders the stored verdict, or the empty heading when there is none.
pub fn render(test_id: &str, result: Option<&ColorRuleResult>, swatches: bool) -> String {
    match result {
        Some(r) => render_text(test_id, r, swatches),
        None => render_empty(test_id),
    }
}

fn heading(test_id: &str) -> String {
    if test_id.len() == 6 && test_id.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &test_id[0..2], &test_id[2..4], &test_id[4..6])
    } else {
        test_id.to_string()
    }
}

pub fn render_text(test_id: &str, result: &ColorRuleResult, swatches: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} color test", heading(test_id));
    for role in Role::ALL {
        let share = result.share(role);
        let _ = writeln!(out, "{}", title(role));
        if swatches {
            let _ = writeln!(out, "  {} Color: {}", swatch(share.color), share.color);
        } else {
            let _ = writeln!(out, "  Color: {}", share.color);
        }
        let _ = writeln!(out, "  Percentage: {:.2}%", share.percentage);
    }
    let _ = writeln!(out, "Rule followed: {}", yes_no(result.rule_followed));
    let _ = writeln!(out, "  Details");
    for role in Role::ALL {
        let _ = writeln!(out, "  {}: {}", title(role), yes_no(result.role_ok(role)));
    }
    out
}

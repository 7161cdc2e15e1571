//! Line-oriented driver for a [`LabelSession`], fed from stdin or a file.

use super::session::LabelSession;
use super::types::HexColor;
use crate::model::Role;
use anyhow::{anyhow, bail, Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelCommand {
    List,
    Select(usize),
    Show,
    Pick(Role, HexColor),
    Save,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  list                     list images in the batch
  select <index>           select an image (0-based)
  show                     show the selected image and picker values
  primary <#rrggbb>        set the primary picker
  secondary <#rrggbb>      set the secondary picker
  accent <#rrggbb>         set the accent picker
  save                     save picker values for the selected image
  export [path]            write the labeled set as JSON
  help                     show this help
  quit                     leave the session";

impl LabelCommand {
    /// Parses one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Ok(None);
        };
        let arg = parts.next();
        if parts.next().is_some() {
            bail!("too many arguments: {line}");
        }

        let cmd = match (verb.to_ascii_lowercase().as_str(), arg) {
            ("list" | "ls", None) => Self::List,
            ("select" | "sel", Some(i)) => {
                Self::Select(i.parse().with_context(|| format!("bad index: {i}"))?)
            }
            ("show", None) => Self::Show,
            ("primary", Some(c)) => Self::Pick(Role::Primary, HexColor::parse(c)?),
            ("secondary", Some(c)) => Self::Pick(Role::Secondary, HexColor::parse(c)?),
            ("accent", Some(c)) => Self::Pick(Role::Accent, HexColor::parse(c)?),
            ("save", None) => Self::Save,
            ("export", p) => Self::Export(p.map(PathBuf::from)),
            ("help" | "?", None) => Self::Help,
            ("quit" | "exit" | "q", None) => Self::Quit,
            _ => return Err(anyhow!("unknown command: {line} (try `help`)")),
        };
        Ok(Some(cmd))
    }
}

/// Runs commands until `quit` or end of input. Failed commands are reported
/// and leave the session unchanged.
pub fn run<R: BufRead, W: Write>(
    session: &mut LabelSession,
    input: R,
    out: &mut W,
    default_export: &Path,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("reading command")?;
        let cmd = match LabelCommand::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(err) => {
                warn!("{err:#}");
                writeln!(out, "error: {err:#}")?;
                continue;
            }
        };
        if cmd == LabelCommand::Quit {
            break;
        }
        if let Err(err) = apply(session, cmd, out, default_export) {
            warn!("{err:#}");
            writeln!(out, "error: {err:#}")?;
        }
    }
    Ok(())
}

fn apply<W: Write>(
    session: &mut LabelSession,
    cmd: LabelCommand,
    out: &mut W,
    default_export: &Path,
) -> Result<()> {
    match cmd {
        LabelCommand::List => {
            let selected = session.batch().selected_index();
            for (i, img) in session.batch().images().iter().enumerate() {
                let mark = if Some(i) == selected { '*' } else { ' ' };
                let saved = if session.store().find(&img.name).is_some() {
                    " [labeled]"
                } else {
                    ""
                };
                writeln!(out, "{mark} {i:>3} {}{saved}", img.name)?;
            }
        }
        LabelCommand::Select(i) => {
            let name = session.select(i)?.name.clone();
            writeln!(out, "selected {i}: {name}")?;
            show(session, out)?;
        }
        LabelCommand::Show => show(session, out)?,
        LabelCommand::Pick(role, color) => session.set_color(role, color),
        LabelCommand::Save => {
            let entry = session.save()?;
            writeln!(out, "saved {}", entry.name)?;
        }
        LabelCommand::Export(path) => {
            let path = path.unwrap_or_else(|| default_export.to_path_buf());
            session.export_to(&path)?;
            writeln!(
                out,
                "exported {} labels to {}",
                session.store().len(),
                path.display()
            )?;
        }
        LabelCommand::Help => writeln!(out, "{HELP}")?,
        LabelCommand::Quit => {}
    }
    Ok(())
}

fn show<W: Write>(session: &LabelSession, out: &mut W) -> Result<()> {
    match session.batch().selected() {
        Some(img) => writeln!(out, "image: {}", img.name)?,
        None => writeln!(out, "image: <none>")?,
    }
    for role in Role::ALL {
        writeln!(out, "  {:<9} {}", role.label(), session.editor().get(role))?;
    }
    Ok(())
}

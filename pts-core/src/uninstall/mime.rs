// pts-core/src/uninstall/mime.rs
//! Drops MIME associations that point at our desktop entry.
//!
//! `xdg-mime default` records defaults in `$XDG_CONFIG_HOME/mimeapps.list`.
//! Our entries are scrubbed from that file, then every type we were the
//! default for and that still lists another handler is handed to that
//! handler through `xdg-mime`, so desktop-specific stores follow along.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use pts_common::app;
use pts_common::config::Config;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::tools::{Invocation, ToolStatus, Toolbox};

pub const MIME_TOOL: &str = "xdg-mime";

const DEFAULTS_SECTION: &str = "[Default Applications]";

/// What happened to `mimeapps.list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimeReset {
    /// No `mimeapps.list` exists.
    NoAssociations,
    Unchanged,
    /// This many association lines were rewritten or dropped.
    Reset(usize),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeReport {
    pub scrub: MimeReset,
    /// `NotFound` whenever `xdg-mime` is missing, even if nothing needed it.
    pub tool: ToolStatus,
}

/// A default we held that now falls to the next listed handler.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Handover {
    mime_type: String,
    handler: String,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Scrub {
    contents: String,
    touched: usize,
    handovers: Vec<Handover>,
}

pub fn reset_mime_defaults(config: &Config, tools: &dyn Toolbox) -> MimeReport {
    let tool_available = tools.command_exists(MIME_TOOL);
    if !tool_available {
        debug!("{} not found on PATH", MIME_TOOL);
    }

    let path = config.mimeapps_list_path();
    let original = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No mimeapps.list at {}", path.display());
            return MimeReport {
                scrub: MimeReset::NoAssociations,
                tool: tool_status(tool_available),
            };
        }
        Err(e) => {
            debug!("Could not read {}: {}", path.display(), e);
            return MimeReport {
                scrub: MimeReset::Failed(e.to_string()),
                tool: tool_status(tool_available),
            };
        }
    };

    let scrub = scrub_associations(&original, &app::desktop_file_name());
    if scrub.touched == 0 {
        return MimeReport {
            scrub: MimeReset::Unchanged,
            tool: tool_status(tool_available),
        };
    }
    if let Err(e) = write_text_file_atomic(&path, &scrub.contents) {
        debug!("Could not write {}: {}", path.display(), e);
        return MimeReport {
            scrub: MimeReset::Failed(e.to_string()),
            tool: tool_status(tool_available),
        };
    }
    debug!("Reset {} MIME association(s) in {}", scrub.touched, path.display());

    let tool = if tool_available {
        hand_over(tools, &scrub.handovers)
    } else {
        ToolStatus::NotFound
    };
    MimeReport {
        scrub: MimeReset::Reset(scrub.touched),
        tool,
    }
}

fn tool_status(available: bool) -> ToolStatus {
    if available {
        ToolStatus::Ran
    } else {
        ToolStatus::NotFound
    }
}

/// Runs `xdg-mime default <handler> <type>` for each handover. The first
/// failure is reported; the rest still run.
fn hand_over(tools: &dyn Toolbox, handovers: &[Handover]) -> ToolStatus {
    let mut status = ToolStatus::Ran;
    for handover in handovers {
        let invocation = Invocation::new(MIME_TOOL)
            .arg("default")
            .arg(&handover.handler)
            .arg(&handover.mime_type)
            .quiet();
        let result = tools.run(&invocation);
        debug!("{} finished: {:?}", invocation, result);
        if status.success() && !result.success() {
            status = result;
        }
    }
    status
}

/// Replaces `path` with `content` through a sibling temp file, so a failed
/// write never leaves a truncated file behind.
fn write_text_file_atomic(path: &Path, content: &str) -> io::Result<()> {
    let dir = path.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no parent directory", path.display()),
        )
    })?;
    let original_perms = fs::metadata(path).map(|m| m.permissions()).ok();

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    let _ = temp_file.as_file().sync_all();
    temp_file.persist(path).map_err(|e| e.error)?;

    if let Some(perms) = original_perms {
        let _ = fs::set_permissions(path, perms);
    }
    Ok(())
}

/// Removes `desktop_file` from every `type=a.desktop;b.desktop;` line. Lines
/// left without any handler are dropped.
fn scrub_associations(contents: &str, desktop_file: &str) -> Scrub {
    let mut scrub = Scrub {
        contents: String::with_capacity(contents.len()),
        ..Scrub::default()
    };
    let mut in_defaults = false;
    for line in contents.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') {
            in_defaults = trimmed.trim_end() == DEFAULTS_SECTION;
        }
        let is_entry = !trimmed.starts_with('#') && !trimmed.starts_with('[');
        let Some((key, value)) = line.split_once('=').filter(|_| is_entry) else {
            scrub.contents.push_str(line);
            scrub.contents.push('\n');
            continue;
        };
        let handlers: Vec<&str> = value.split(';').filter(|h| !h.is_empty()).collect();
        if !handlers.iter().any(|h| h.trim() == desktop_file) {
            scrub.contents.push_str(line);
            scrub.contents.push('\n');
            continue;
        }
        scrub.touched += 1;
        let was_default = handlers.first().map(|h| h.trim()) == Some(desktop_file);
        let kept: Vec<&str> = handlers
            .into_iter()
            .filter(|h| h.trim() != desktop_file)
            .collect();
        let Some(next) = kept.first() else {
            continue;
        };
        if in_defaults && was_default {
            scrub.handovers.push(Handover {
                mime_type: key.trim().to_string(),
                handler: next.trim().to_string(),
            });
        }
        scrub.contents.push_str(key);
        scrub.contents.push('=');
        for handler in kept {
            scrub.contents.push_str(handler);
            scrub.contents.push(';');
        }
        scrub.contents.push('\n');
    }
    scrub
}

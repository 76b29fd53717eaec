//! Status lines shown to the user, one category per function.

use colored::Colorize;
use pts_core::uninstall::mime::MIME_TOOL;
use pts_core::{RefreshOutcome, ToolStatus};

pub fn info(message: &str) {
    println!("{}{}", "==> ".bold().blue(), message.bold());
}

pub fn ok(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn warn(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}

pub fn error(message: &str) {
    eprintln!("{}: {}", "Error".red().bold(), message);
}

pub fn refresh_outcome(outcome: &RefreshOutcome) {
    match &outcome.status {
        ToolStatus::Ran => ok(&format!("{} refreshed", outcome.tool)),
        // Not installed and failed-to-run read the same to the user.
        _ => warn(&format!(
            "{} not available or failed; the launcher may appear after the next login",
            outcome.tool
        )),
    }
}

pub fn mime_tool_status(status: &ToolStatus) {
    match status {
        ToolStatus::Ran => {}
        ToolStatus::NotFound => warn(&format!(
            "{MIME_TOOL} not found; MIME defaults were only reset in mimeapps.list"
        )),
        ToolStatus::Failed(reason) => warn(&format!("{MIME_TOOL} failed: {reason}")),
    }
}

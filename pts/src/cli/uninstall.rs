// pts/src/cli/uninstall.rs

use pts_common::app::APP_NAME;
use pts_common::config::Config;
use pts_core::uninstall::{MimeReset, Removal};
use pts_core::{uninstall_desktop_integration, SystemToolbox};
use tracing::instrument;

use crate::ui;

#[derive(Debug)]
pub struct Uninstall;

impl Uninstall {
    /// Always completes; anything that could not be cleaned up is a warning.
    #[instrument(skip_all)]
    pub fn run(&self, config: &Config) {
        ui::info(&format!("Uninstalling {APP_NAME}"));

        let report = uninstall_desktop_integration(config, &SystemToolbox);

        for (path, removal) in &report.removed {
            match removal {
                Removal::Removed => ui::ok(&format!("Removed {}", path.display())),
                Removal::AlreadyAbsent => ui::ok(&format!("Not present: {}", path.display())),
                Removal::Failed(reason) => {
                    ui::warn(&format!("Could not remove {}: {}", path.display(), reason))
                }
            }
        }

        match &report.mime.scrub {
            MimeReset::Reset(count) => ui::ok(&format!("Reset {count} MIME association(s)")),
            MimeReset::NoAssociations | MimeReset::Unchanged => {}
            MimeReset::Failed(reason) => {
                ui::warn(&format!("Could not reset MIME associations: {reason}"))
            }
        }
        ui::mime_tool_status(&report.mime.tool);

        for outcome in &report.refresh {
            ui::refresh_outcome(outcome);
        }

        ui::info(&format!("{APP_NAME} has been removed from the application menu."));
    }
}

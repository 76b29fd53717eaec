// pts/src/cli/install.rs

use pts_common::app::{APP_ID, APP_NAME};
use pts_common::config::Config;
use pts_common::error::Result;
use pts_core::{install_desktop_integration, CheckOutcome, SystemToolbox};
use tracing::{debug, instrument};

use crate::ui;

#[derive(Debug)]
pub struct Install;

impl Install {
    #[instrument(skip_all)]
    pub fn run(&self, config: &Config) -> Result<()> {
        ui::info(&format!("Installing {APP_NAME} ({APP_ID})"));

        let report = install_desktop_integration(config, &SystemToolbox, &mut |check| {
            match &check.outcome {
                CheckOutcome::Pass => ui::ok(&format!("{}: ok", check.name)),
                CheckOutcome::Warn(message) => ui::warn(&format!("{}: {}", check.name, message)),
            }
        })?;

        ui::ok(&format!("Icon installed: {}", report.files.icon.display()));
        ui::ok(&format!(
            "Desktop entry installed: {}",
            report.files.desktop_entry.display()
        ));
        for outcome in &report.refresh {
            ui::refresh_outcome(outcome);
        }

        debug!("Install finished: {:?}", report.files);
        let launcher = config.launcher_path()?;
        ui::info(&format!(
            "{APP_NAME} is installed. Launch it from your application menu or run {}",
            launcher.display()
        ));
        Ok(())
    }
}

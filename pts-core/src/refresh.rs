// pts-core/src/refresh.rs
//! Best-effort rebuild of the icon-theme cache and the desktop-entry database.

use pts_common::config::Config;
use tracing::debug;

use crate::tools::{Invocation, ToolStatus, Toolbox};

pub const ICON_CACHE_TOOL: &str = "gtk-update-icon-cache";
pub const DESKTOP_DATABASE_TOOL: &str = "update-desktop-database";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub tool: &'static str,
    pub status: ToolStatus,
}

impl RefreshOutcome {
    pub fn refreshed(&self) -> bool {
        self.status.success()
    }
}

/// Runs both cache utilities. Outcomes are informational only.
pub fn refresh_caches(config: &Config, tools: &dyn Toolbox) -> Vec<RefreshOutcome> {
    let icon_theme = config.icon_theme_dir();
    let applications = config.applications_dir();
    vec![
        refresh(
            tools,
            ICON_CACHE_TOOL,
            Invocation::new(ICON_CACHE_TOOL)
                .args(["-f", "-t"])
                .arg(&icon_theme)
                .quiet(),
        ),
        refresh(
            tools,
            DESKTOP_DATABASE_TOOL,
            Invocation::new(DESKTOP_DATABASE_TOOL)
                .arg(&applications)
                .quiet(),
        ),
    ]
}

fn refresh(tools: &dyn Toolbox, tool: &'static str, invocation: Invocation) -> RefreshOutcome {
    let status = if tools.command_exists(tool) {
        tools.run(&invocation)
    } else {
        ToolStatus::NotFound
    };
    debug!("{} finished: {:?}", tool, status);
    RefreshOutcome { tool, status }
}

// pts-core/src/pipeline.rs
//! The install path end to end: preflight, resources, cache refresh.

use pts_common::config::Config;
use pts_common::error::Result;
use tracing::{debug, instrument};

use crate::install::{install_resources, InstalledFiles};
use crate::preflight::{run_preflight, CheckResult};
use crate::refresh::{refresh_caches, RefreshOutcome};
use crate::tools::Toolbox;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub checks: Vec<CheckResult>,
    pub files: InstalledFiles,
    pub refresh: Vec<RefreshOutcome>,
}

/// Runs the install path. A fail-severity check, a failed package install or
/// a missing bundled asset returns `Err` before anything is written.
#[instrument(skip_all)]
pub fn install_desktop_integration(
    config: &Config,
    tools: &dyn Toolbox,
    on_check: &mut dyn FnMut(&CheckResult),
) -> Result<InstallReport> {
    let checks = run_preflight(config, tools, on_check)?;
    debug!("Preflight passed with {} check(s)", checks.len());

    let files = install_resources(config)?;
    let refresh = refresh_caches(config, tools);

    Ok(InstallReport {
        checks,
        files,
        refresh,
    })
}

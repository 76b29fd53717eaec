// pts-core/src/uninstall/mod.rs

pub mod common;
pub mod mime;

use std::path::PathBuf;

use pts_common::config::Config;
use tracing::debug;

pub use self::common::Removal;
pub use self::mime::{MimeReport, MimeReset};
use crate::refresh::{refresh_caches, RefreshOutcome};
use crate::tools::Toolbox;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UninstallReport {
    /// Desktop entry first, then the icon.
    pub removed: Vec<(PathBuf, Removal)>,
    pub mime: MimeReport,
    pub refresh: Vec<RefreshOutcome>,
}

/// Removes the files `install_resources` writes, at the same derived paths,
/// resets our MIME defaults and refreshes the caches. Never fails; problems are reported in the
/// returned [`UninstallReport`].
pub fn uninstall_desktop_integration(config: &Config, tools: &dyn Toolbox) -> UninstallReport {
    let removed = [config.desktop_entry_path(), config.icon_path()]
        .into_iter()
        .map(|path| {
            let outcome = common::remove_filesystem_artifact(&path);
            (path, outcome)
        })
        .collect();

    let mime = mime::reset_mime_defaults(config, tools);
    debug!("MIME reset: {:?}", mime);

    let refresh = refresh_caches(config, tools);

    UninstallReport {
        removed,
        mime,
        refresh,
    }
}

// pts-core/src/install/mod.rs

pub mod desktop_entry;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use pts_common::app::APP_ID;
use pts_common::config::Config;
use pts_common::error::{PtsError, Result};
use tracing::debug;

pub use self::desktop_entry::DesktopEntry;

/// Files written by [`install_resources`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledFiles {
    pub icon: PathBuf,
    pub desktop_entry: PathBuf,
}

/// Copies the bundled icon and writes the launcher descriptor, overwriting
/// whatever is already there. Running it twice leaves identical files.
pub fn install_resources(config: &Config) -> Result<InstalledFiles> {
    let icon_src = config.bundled_icon()?;
    if !icon_src.is_file() {
        return Err(PtsError::MissingAsset(format!(
            "{} (the installer bundle is incomplete)",
            icon_src.display()
        )));
    }

    ensure_dir(&config.icon_dir())?;
    ensure_dir(&config.applications_dir())?;

    let icon = config.icon_path();
    debug!("Copying icon {} -> {}", icon_src.display(), icon.display());
    fs::copy(&icon_src, &icon).map_err(|e| {
        PtsError::InstallError(format!(
            "Failed to copy icon to {}: {e}",
            icon.display()
        ))
    })?;

    let entry = DesktopEntry::for_launcher(&config.launcher_path()?, APP_ID);
    let contents = entry.render()?;
    let desktop_entry = config.desktop_entry_path();
    debug!("Writing desktop entry {}", desktop_entry.display());
    fs::write(&desktop_entry, contents).map_err(|e| {
        PtsError::InstallError(format!(
            "Failed to write desktop entry {}: {e}",
            desktop_entry.display()
        ))
    })?;
    fs::set_permissions(&desktop_entry, fs::Permissions::from_mode(0o755))?;

    Ok(InstalledFiles {
        icon,
        desktop_entry,
    })
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| {
        PtsError::InstallError(format!("Failed to create directory {}: {e}", dir.display()))
    })
}

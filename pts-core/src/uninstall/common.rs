// pts-core/src/uninstall/common.rs

use std::path::Path;
use std::{fs, io};

use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    Removed,
    /// Nothing was there; counts as success.
    AlreadyAbsent,
    Failed(String),
}

/// Removes a single installed file (or a symlink standing in for it).
///
/// A path that does not exist is reported as [`Removal::AlreadyAbsent`]; the
/// installer never writes directories, so one found here is left alone.
pub(crate) fn remove_filesystem_artifact(path: &Path) -> Removal {
    match path.symlink_metadata() {
        Ok(metadata) if metadata.file_type().is_dir() => {
            debug!(
                "Expected a file but found a directory, leaving it: {}",
                path.display()
            );
            Removal::Failed(format!("{} is a directory", path.display()))
        }
        Ok(_) => match fs::remove_file(path) {
            Ok(()) => {
                debug!("Successfully removed artifact: {}", path.display());
                Removal::Removed
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Artifact {} already removed.", path.display());
                Removal::AlreadyAbsent
            }
            Err(e) => {
                debug!("Failed to remove artifact {}: {}", path.display(), e);
                Removal::Failed(e.to_string())
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Artifact not found (already removed?): {}", path.display());
            Removal::AlreadyAbsent
        }
        Err(e) => {
            debug!(
                "Failed to get metadata for artifact {}: {}",
                path.display(),
                e
            );
            Removal::Failed(e.to_string())
        }
    }
}

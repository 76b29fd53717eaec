use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum PtsError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    /// A fail-severity preflight check did not pass. The message carries the
    /// remediation instructions shown to the user.
    #[error("Preflight check '{check}' failed: {message}")]
    Preflight { check: &'static str, message: String },

    #[error("Package installation failed for [{packages}]: {reason}")]
    Remediation { packages: String, reason: String },

    #[error("Installation Error: {0}")]
    InstallError(String),

    #[error("Bundled asset missing: {0}")]
    MissingAsset(String),

    #[error("Validation Error: {0}")]
    Validation(String),

}

impl From<std::io::Error> for PtsError {
    fn from(err: std::io::Error) -> Self {
        PtsError::Io(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, PtsError>;

// pts-core/src/lib.rs

pub mod install;
pub mod pipeline;
pub mod preflight;
pub mod refresh;
pub mod tools;
pub mod uninstall;

// Re-export key types for easier use by the CLI crate
pub use install::{install_resources, InstalledFiles};
pub use pipeline::{install_desktop_integration, InstallReport};
pub use preflight::{run_preflight, CheckOutcome, CheckResult, Severity};
pub use refresh::{refresh_caches, RefreshOutcome};
pub use tools::{Invocation, SystemToolbox, ToolStatus, Toolbox};
pub use uninstall::{uninstall_desktop_integration, UninstallReport};

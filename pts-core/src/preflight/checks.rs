// pts-core/src/preflight/checks.rs
use pts_common::app::{REQUIRED_PACKAGES, TYPING_TOOL};
use pts_common::config::Config;
use pts_common::error::{PtsError, Result};
use tracing::debug;

use crate::tools::{Invocation, ToolStatus, Toolbox};

const GTK_IMPORT_CHECK: &str =
    "import gi; gi.require_version('Gtk', '4.0'); gi.require_version('Adw', '1')";

pub fn virtualenv(config: &Config, _tools: &dyn Toolbox) -> Result<Option<String>> {
    let marker = config.venv_activate();
    if marker.is_file() {
        debug!("Found virtual environment marker at {}", marker.display());
        return Ok(None);
    }
    let venv = config.venv_dir.display();
    Ok(Some(format!(
        "virtual environment not found at {venv}\n\
         Create it with:\n  \
         python3 -m venv --system-site-packages {venv}\n  \
         {venv}/bin/pip install {}",
        REQUIRED_PACKAGES.join(" ")
    )))
}

pub fn speech_model(config: &Config, _tools: &dyn Toolbox) -> Result<Option<String>> {
    if config.model_dir.is_dir() {
        return Ok(None);
    }
    Ok(Some(format!(
        "speech recognition model not found at {}; the application will report this when it starts",
        config.model_dir.display()
    )))
}

/// Returns the required packages `pip show` does not know about, in
/// declaration order. Every package is queried.
pub fn missing_packages(config: &Config, tools: &dyn Toolbox) -> Vec<&'static str> {
    let pip = config.venv_pip();
    REQUIRED_PACKAGES
        .iter()
        .copied()
        .filter(|pkg| {
            let status = tools.run(&Invocation::new(&pip).arg("show").arg(pkg).quiet());
            debug!("pip show {}: {:?}", pkg, status);
            !status.success()
        })
        .collect()
}

/// Installs exactly `packages` with the virtual environment's pip, in one call.
pub fn install_packages(config: &Config, tools: &dyn Toolbox, packages: &[&str]) -> Result<()> {
    let invocation = Invocation::new(config.venv_pip())
        .arg("install")
        .args(packages);
    match tools.run(&invocation) {
        ToolStatus::Ran => Ok(()),
        ToolStatus::Failed(reason) => Err(PtsError::Remediation {
            packages: packages.join(", "),
            reason,
        }),
        ToolStatus::NotFound => Err(PtsError::Remediation {
            packages: packages.join(", "),
            reason: format!("{} not found", config.venv_pip().display()),
        }),
    }
}

pub fn python_packages(config: &Config, tools: &dyn Toolbox) -> Result<Option<String>> {
    let missing = missing_packages(config, tools);
    if missing.is_empty() {
        return Ok(None);
    }
    debug!(
        "Missing Python packages: {}. Installing into {}",
        missing.join(", "),
        config.venv_dir.display()
    );
    install_packages(config, tools, &missing)?;
    Ok(Some(format!(
        "installed missing Python packages: {}",
        missing.join(", ")
    )))
}

pub fn gtk_bindings(config: &Config, tools: &dyn Toolbox) -> Result<Option<String>> {
    let check = Invocation::new(config.venv_python())
        .arg("-c")
        .arg(GTK_IMPORT_CHECK)
        .quiet();
    match tools.run(&check) {
        ToolStatus::Ran => Ok(None),
        status => {
            debug!("GTK binding import returned {:?}", status);
            Ok(Some(
                "GTK 4 / libadwaita Python bindings (PyGObject) are not available\n\
                 Install them with your distribution's package manager, e.g.:\n  \
                 sudo dnf install python3-gobject gtk4 libadwaita\n  \
                 sudo apt install python3-gi gir1.2-gtk-4.0 gir1.2-adw-1"
                    .to_string(),
            ))
        }
    }
}

pub fn typing_tool(_config: &Config, tools: &dyn Toolbox) -> Result<Option<String>> {
    if tools.command_exists(TYPING_TOOL) {
        return Ok(None);
    }
    Ok(Some(format!(
        "'{TYPING_TOOL}' not found on PATH; typing into the active window will be unavailable (clipboard mode still works)"
    )))
}

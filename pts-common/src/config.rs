// pts-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use directories::UserDirs;
use tracing::debug;

use super::app;
use super::error::{PtsError, Result};

// Fallbacks used when the PTT_* overrides are not set or empty.
const DEFAULT_VENV_DIR: &str = "stt-venv";
const DEFAULT_MODEL_DIR: &str = "stt-models/polish";

#[derive(Debug, Clone)]
pub struct Config {
    pub home: PathBuf,
    /// `$XDG_DATA_HOME`, usually `~/.local/share`.
    pub data_home: PathBuf,
    /// `$XDG_CONFIG_HOME`, usually `~/.config`.
    pub config_home: PathBuf,
    pub venv_dir: PathBuf,
    pub model_dir: PathBuf,
    /// Directory the installer ships from; holds the icon asset and the launcher.
    /// Only the install path needs it, so failing to find it is not an error
    /// until [`Config::bundle_dir`] is asked for.
    pub bundle_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading pts configuration");

        let home = UserDirs::new()
            .map(|ud| ud.home_dir().to_path_buf())
            .ok_or_else(|| {
                PtsError::Config("Could not determine the home directory".to_string())
            })?;

        let mut config = Self::for_home(home, PathBuf::new());
        config.bundle_dir = locate_bundle_dir();

        if let Some(dir) = env_path("XDG_DATA_HOME").filter(|p| p.is_absolute()) {
            config.data_home = dir;
        }
        if let Some(dir) = env_path("XDG_CONFIG_HOME").filter(|p| p.is_absolute()) {
            config.config_home = dir;
        }
        if let Some(dir) = env_path("PTT_VENV_DIR") {
            config.venv_dir = config.expand_home(dir);
        }
        if let Some(dir) = env_path("PTT_MODEL_DIR") {
            config.model_dir = config.expand_home(dir);
        }

        debug!("Effective venv dir: {}", config.venv_dir.display());
        debug!("Effective model dir: {}", config.model_dir.display());
        debug!("Effective bundle dir: {:?}", config.bundle_dir);
        debug!("Configuration loaded successfully.");
        Ok(config)
    }

    /// Builds a configuration rooted at `home` with every default applied and
    /// no environment overrides.
    pub fn for_home(home: impl Into<PathBuf>, bundle_dir: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            data_home: home.join(".local").join("share"),
            config_home: home.join(".config"),
            venv_dir: home.join(DEFAULT_VENV_DIR),
            model_dir: home.join(DEFAULT_MODEL_DIR),
            bundle_dir: Some(bundle_dir.into()),
            home,
        }
    }

    pub fn icon_theme_dir(&self) -> PathBuf {
        self.data_home.join("icons").join("hicolor")
    }

    pub fn icon_dir(&self) -> PathBuf {
        self.icon_theme_dir().join("scalable").join("apps")
    }

    pub fn applications_dir(&self) -> PathBuf {
        self.data_home.join("applications")
    }

    pub fn icon_path(&self) -> PathBuf {
        self.icon_dir().join(app::icon_file_name())
    }

    pub fn desktop_entry_path(&self) -> PathBuf {
        self.applications_dir().join(app::desktop_file_name())
    }

    pub fn mimeapps_list_path(&self) -> PathBuf {
        self.config_home.join("mimeapps.list")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_home.join("pts").join("logs")
    }

    pub fn venv_activate(&self) -> PathBuf {
        self.venv_dir.join("bin").join("activate")
    }

    pub fn venv_pip(&self) -> PathBuf {
        self.venv_dir.join("bin").join("pip")
    }

    pub fn venv_python(&self) -> PathBuf {
        self.venv_dir.join("bin").join("python")
    }

    pub fn bundle_dir(&self) -> Result<&Path> {
        self.bundle_dir.as_deref().ok_or_else(|| {
            PtsError::Config(
                "Could not locate the installer bundle; set PTT_BUNDLE_DIR".to_string(),
            )
        })
    }

    pub fn bundled_icon(&self) -> Result<PathBuf> {
        Ok(self.bundle_dir()?.join(app::BUNDLED_ICON))
    }

    pub fn launcher_path(&self) -> Result<PathBuf> {
        Ok(self.bundle_dir()?.join(app::LAUNCHER_NAME))
    }

    fn expand_home(&self, path: PathBuf) -> PathBuf {
        match path.strip_prefix("~") {
            Ok(rest) => self.home.join(rest),
            Err(_) if path.is_relative() => self.home.join(path),
            Err(_) => path,
        }
    }
}

/// `$PTT_BUNDLE_DIR`, else the directory holding the running executable.
fn locate_bundle_dir() -> Option<PathBuf> {
    if let Some(dir) = env_path("PTT_BUNDLE_DIR") {
        return match std::path::absolute(&dir) {
            Ok(abs) => Some(abs),
            Err(e) => {
                debug!("Could not make {} absolute: {}", dir.display(), e);
                None
            }
        };
    }
    match env::current_exe() {
        Ok(exe) => exe.parent().map(Path::to_path_buf),
        Err(e) => {
            debug!("Could not determine the executable path: {}", e);
            None
        }
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

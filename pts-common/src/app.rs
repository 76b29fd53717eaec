//! Identity of the application this installer integrates with the desktop.
//!
//! Install and uninstall both derive every target file name from [`APP_ID`];
//! nothing about an installation is recorded anywhere else.

/// Reverse-DNS identifier, also used as the icon name and `StartupWMClass`.
pub const APP_ID: &str = "pl.tomw.PushToTalk";
pub const APP_NAME: &str = "Push-to-Talk STT";
pub const APP_VERSION: &str = "1.0.0";

/// GUI launcher shipped next to the installer.
pub const LAUNCHER_NAME: &str = "ptt-gui";

/// Icon shipped next to the installer, relative to the bundle directory.
pub const BUNDLED_ICON: &str = "assets/pl.tomw.PushToTalk.svg";

/// Python distributions the GUI imports at startup.
pub const REQUIRED_PACKAGES: &[&str] = &["vosk", "sounddevice", "numpy"];

/// Keystroke simulator used to type transcriptions into the focused window.
pub const TYPING_TOOL: &str = "wtype";

pub fn icon_file_name() -> String {
    format!("{APP_ID}.svg")
}

pub fn desktop_file_name() -> String {
    format!("{APP_ID}.desktop")
}

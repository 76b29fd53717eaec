// pts-core/src/install/desktop_entry.rs
//! The `.desktop` launcher descriptor written for the GUI.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use pts_common::app::APP_NAME;
use pts_common::error::{PtsError, Result};

const CATEGORIES: &[&str] = &["AudioVideo", "Audio", "Utility", "Accessibility"];
const KEYWORDS: &[&str] = &[
    "speech",
    "voice",
    "dictation",
    "transcription",
    "stt",
    "mowa",
    "dyktowanie",
];

/// Characters that force an `Exec` argument to be quoted.
const EXEC_RESERVED: &[char] = &[
    ' ', '\t', '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#', '(', ')', '`',
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    pub name: String,
    pub name_pl: String,
    pub generic_name: String,
    pub generic_name_pl: String,
    pub comment: String,
    pub comment_pl: String,
    pub exec: PathBuf,
    pub icon: String,
    pub terminal: bool,
    pub categories: Vec<String>,
    pub keywords: Vec<String>,
    pub startup_notify: bool,
    pub startup_wm_class: String,
}

impl DesktopEntry {
    /// The launcher entry for the GUI at `launcher`, identified by `app_id`.
    pub fn for_launcher(launcher: &Path, app_id: &str) -> Self {
        Self {
            name: APP_NAME.to_string(),
            name_pl: "Naciśnij i mów".to_string(),
            generic_name: "Speech to Text".to_string(),
            generic_name_pl: "Mowa na tekst".to_string(),
            comment: "Push-to-talk speech recognition that types what you say".to_string(),
            comment_pl: "Rozpoznawanie mowy: przytrzymaj przycisk, mów, puść".to_string(),
            exec: launcher.to_path_buf(),
            icon: app_id.to_string(),
            terminal: false,
            categories: CATEGORIES.iter().map(|s| s.to_string()).collect(),
            keywords: KEYWORDS.iter().map(|s| s.to_string()).collect(),
            startup_notify: true,
            startup_wm_class: app_id.to_string(),
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.exec.is_absolute() {
            return Err(PtsError::Validation(format!(
                "launcher path must be absolute: {}",
                self.exec.display()
            )));
        }
        let exec = self.exec.to_string_lossy();
        let fields = [
            ("Name", self.name.as_str()),
            ("Name[pl]", self.name_pl.as_str()),
            ("GenericName", self.generic_name.as_str()),
            ("GenericName[pl]", self.generic_name_pl.as_str()),
            ("Comment", self.comment.as_str()),
            ("Comment[pl]", self.comment_pl.as_str()),
            ("Exec", exec.as_ref()),
            ("Icon", self.icon.as_str()),
            ("StartupWMClass", self.startup_wm_class.as_str()),
        ];
        for (key, value) in fields {
            if value.contains(['\n', '\r']) {
                return Err(PtsError::Validation(format!(
                    "{key} contains a line break: {value:?}"
                )));
            }
        }
        for tag in self.categories.iter().chain(&self.keywords) {
            if tag.is_empty() || tag.contains([';', '\n', '\r']) {
                return Err(PtsError::Validation(format!("invalid list entry: {tag:?}")));
            }
        }
        Ok(())
    }

    /// Renders the key file. The output only depends on the entry's fields.
    pub fn render(&self) -> Result<String> {
        self.validate()?;

        let mut out = String::from("[Desktop Entry]\n");
        let mut line = |key: &str, value: &str| {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{key}={value}");
        };
        line("Type", "Application");
        line("Name", &self.name);
        line("Name[pl]", &self.name_pl);
        line("GenericName", &self.generic_name);
        line("GenericName[pl]", &self.generic_name_pl);
        line("Comment", &self.comment);
        line("Comment[pl]", &self.comment_pl);
        line("Exec", &exec_value(&self.exec));
        line("Icon", &self.icon);
        line("Terminal", bool_value(self.terminal));
        line("Categories", &list_value(&self.categories));
        line("Keywords", &list_value(&self.keywords));
        line("StartupNotify", bool_value(self.startup_notify));
        line("StartupWMClass", &self.startup_wm_class);
        Ok(out)
    }
}

fn bool_value(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn list_value(items: &[String]) -> String {
    items.iter().map(|item| format!("{item};")).collect()
}

/// Quotes the program path when it contains reserved characters, then applies
/// the key-file string escape (`\` becomes `\\`) and field-code escape (`%`).
fn exec_value(program: &Path) -> String {
    let raw = program.to_string_lossy();
    let quoted = if raw.contains(EXEC_RESERVED) {
        let mut q = String::with_capacity(raw.len() + 2);
        q.push('"');
        for c in raw.chars() {
            if matches!(c, '"' | '`' | '$' | '\\') {
                q.push('\\');
            }
            q.push(c);
        }
        q.push('"');
        q
    } else {
        raw.into_owned()
    };
    quoted.replace('\\', "\\\\").replace('%', "%%")
}

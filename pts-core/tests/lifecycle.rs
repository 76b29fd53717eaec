// pts-core/tests/lifecycle.rs
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs;

use pts_common::app::REQUIRED_PACKAGES;
use pts_common::config::Config;
use pts_common::error::PtsError;
use pts_core::preflight::CheckOutcome;
use pts_core::refresh::{DESKTOP_DATABASE_TOOL, ICON_CACHE_TOOL};
use pts_core::uninstall::mime::MIME_TOOL;
use pts_core::uninstall::{MimeReset, Removal};
use pts_core::{
    install_desktop_integration, uninstall_desktop_integration, InstallReport, Invocation,
    ToolStatus, Toolbox,
};
use tempfile::TempDir;

/// Stands in for pip, the venv python and the desktop utilities.
struct FakeToolbox {
    on_path: BTreeSet<&'static str>,
    installed: RefCell<BTreeSet<String>>,
    gtk_available: bool,
    pip_install_succeeds: bool,
    calls: RefCell<Vec<Invocation>>,
}

impl FakeToolbox {
    fn healthy() -> Self {
        Self {
            on_path: [ICON_CACHE_TOOL, DESKTOP_DATABASE_TOOL, MIME_TOOL, "wtype"].into(),
            installed: RefCell::new(REQUIRED_PACKAGES.iter().map(|p| p.to_string()).collect()),
            gtk_available: true,
            pip_install_succeeds: true,
            calls: RefCell::default(),
        }
    }

    fn calls_to(&self, program: &str) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .filter(|inv| inv.program_name() == program)
            .map(|inv| {
                inv.args
                    .iter()
                    .map(|a| a.to_string_lossy().into_owned())
                    .collect()
            })
            .collect()
    }
}

impl Toolbox for FakeToolbox {
    fn command_exists(&self, name: &str) -> bool {
        self.on_path.contains(name)
    }

    fn run(&self, invocation: &Invocation) -> ToolStatus {
        self.calls.borrow_mut().push(invocation.clone());
        let args: Vec<String> = invocation
            .args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        match (invocation.program_name().as_str(), args.first().map(String::as_str)) {
            ("pip", Some("show")) => {
                if self.installed.borrow().contains(&args[1]) {
                    ToolStatus::Ran
                } else {
                    ToolStatus::Failed("exit status: 1".to_string())
                }
            }
            ("pip", Some("install")) => {
                if self.pip_install_succeeds {
                    self.installed.borrow_mut().extend(args[1..].iter().cloned());
                    ToolStatus::Ran
                } else {
                    ToolStatus::Failed("exit status: 1".to_string())
                }
            }
            ("python", _) if !self.gtk_available => {
                ToolStatus::Failed("exit status: 1".to_string())
            }
            _ => ToolStatus::Ran,
        }
    }
}

struct Fixture {
    _home: TempDir,
    _bundle: TempDir,
    config: Config,
}

impl Fixture {
    /// A home with the venv and model present and a complete bundle.
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let bundle = TempDir::new().unwrap();
        let config = Config::for_home(home.path(), bundle.path());

        fs::create_dir_all(config.venv_activate().parent().unwrap()).unwrap();
        fs::write(config.venv_activate(), "# activate\n").unwrap();
        fs::create_dir_all(&config.model_dir).unwrap();
        let icon_src = config.bundled_icon().unwrap();
        fs::create_dir_all(icon_src.parent().unwrap()).unwrap();
        fs::write(
            &icon_src,
            "<svg xmlns=\"http://www.w3.org/2000/svg\"/>\n",
        )
        .unwrap();

        Self {
            _home: home,
            _bundle: bundle,
            config,
        }
    }

    fn install(&self, tools: &FakeToolbox) -> Result<InstallReport, PtsError> {
        install_desktop_integration(&self.config, tools, &mut |_| {})
    }

    fn snapshot(&self) -> (Vec<u8>, Vec<u8>) {
        (
            fs::read(self.config.icon_path()).unwrap(),
            fs::read(self.config.desktop_entry_path()).unwrap(),
        )
    }
}

#[test]
fn install_is_idempotent() {
    let fx = Fixture::new();
    let tools = FakeToolbox::healthy();

    fx.install(&tools).unwrap();
    let first = fx.snapshot();
    fx.install(&tools).unwrap();
    let second = fx.snapshot();

    assert_eq!(first, second);
    let entry = String::from_utf8(second.1).unwrap();
    let exec = format!("Exec={}\n", fx.config.launcher_path().unwrap().display());
    assert!(entry.contains(&exec));
}

#[test]
fn uninstall_reverses_any_number_of_installs() {
    let fx = Fixture::new();
    let tools = FakeToolbox::healthy();
    for _ in 0..3 {
        fx.install(&tools).unwrap();
    }

    let report = uninstall_desktop_integration(&fx.config, &tools);

    assert!(!fx.config.icon_path().exists());
    assert!(!fx.config.desktop_entry_path().exists());
    assert_eq!(
        report.removed,
        vec![
            (fx.config.desktop_entry_path(), Removal::Removed),
            (fx.config.icon_path(), Removal::Removed),
        ]
    );
}

#[test]
fn uninstall_without_install_is_clean() {
    let fx = Fixture::new();
    let tools = FakeToolbox::healthy();

    let report = uninstall_desktop_integration(&fx.config, &tools);

    assert!(report
        .removed
        .iter()
        .all(|(_, removal)| *removal == Removal::AlreadyAbsent));
    assert!(report.refresh.iter().all(|r| r.refreshed()));
}

#[test]
fn uninstall_does_not_need_the_bundle() {
    let fx = Fixture::new();
    let tools = FakeToolbox::healthy();
    fx.install(&tools).unwrap();
    let mut config = fx.config.clone();
    config.bundle_dir = None;

    let report = uninstall_desktop_integration(&config, &tools);

    assert!(report
        .removed
        .iter()
        .all(|(_, removal)| *removal == Removal::Removed));
}

#[test]
fn uninstall_hands_mime_defaults_back_through_xdg_mime() {
    let fx = Fixture::new();
    let tools = FakeToolbox::healthy();
    fs::create_dir_all(&fx.config.config_home).unwrap();
    fs::write(
        fx.config.mimeapps_list_path(),
        "[Default Applications]\naudio/ogg=pl.tomw.PushToTalk.desktop;org.gnome.Totem.desktop;\n",
    )
    .unwrap();

    let report = uninstall_desktop_integration(&fx.config, &tools);

    assert_eq!(report.mime.scrub, MimeReset::Reset(1));
    assert_eq!(report.mime.tool, ToolStatus::Ran);
    assert_eq!(
        tools.calls_to(MIME_TOOL),
        vec![vec![
            "default".to_string(),
            "org.gnome.Totem.desktop".to_string(),
            "audio/ogg".to_string()
        ]]
    );
}

#[test]
fn missing_xdg_mime_only_warns() {
    let fx = Fixture::new();
    let mut tools = FakeToolbox::healthy();
    tools.on_path.remove(MIME_TOOL);
    fx.install(&tools).unwrap();

    let report = uninstall_desktop_integration(&fx.config, &tools);

    assert_eq!(report.mime.tool, ToolStatus::NotFound);
    assert!(tools.calls_to(MIME_TOOL).is_empty());
    assert!(!fx.config.desktop_entry_path().exists());
    assert!(report.refresh.iter().all(|r| r.refreshed()));
}

#[test]
fn missing_virtualenv_aborts_before_writing() {
    let fx = Fixture::new();
    fs::remove_file(fx.config.venv_activate()).unwrap();
    let tools = FakeToolbox::healthy();

    let err = fx.install(&tools).unwrap_err();

    assert!(matches!(err, PtsError::Preflight { check: "virtualenv", .. }));
    assert!(!fx.config.icon_dir().exists());
    assert!(!fx.config.applications_dir().exists());
    assert!(tools.calls.borrow().is_empty());
}

#[test]
fn only_missing_packages_are_installed_in_one_call() {
    let fx = Fixture::new();
    let tools = FakeToolbox::healthy();
    tools.installed.borrow_mut().retain(|p| p == "sounddevice");

    let report = fx.install(&tools).unwrap();

    let pip = tools.calls_to("pip");
    let shows: Vec<&str> = pip
        .iter()
        .filter(|args| args[0] == "show")
        .map(|args| args[1].as_str())
        .collect();
    assert_eq!(shows, REQUIRED_PACKAGES.to_vec());
    let installs: Vec<&Vec<String>> = pip.iter().filter(|args| args[0] == "install").collect();
    assert_eq!(
        installs,
        vec![&vec![
            "install".to_string(),
            "vosk".to_string(),
            "numpy".to_string()
        ]]
    );

    let packages = report
        .checks
        .iter()
        .find(|c| c.name == "python-packages")
        .unwrap();
    assert!(matches!(packages.outcome, CheckOutcome::Warn(_)));
}

#[test]
fn failed_package_install_aborts() {
    let fx = Fixture::new();
    let mut tools = FakeToolbox::healthy();
    tools.pip_install_succeeds = false;
    tools.installed.borrow_mut().remove("numpy");

    let err = fx.install(&tools).unwrap_err();

    assert!(matches!(err, PtsError::Remediation { .. }));
    assert!(!fx.config.desktop_entry_path().exists());
}

#[test]
fn missing_gtk_bindings_abort() {
    let fx = Fixture::new();
    let mut tools = FakeToolbox::healthy();
    tools.gtk_available = false;

    let err = fx.install(&tools).unwrap_err();

    assert!(matches!(err, PtsError::Preflight { check: "gtk-bindings", .. }));
    assert!(!fx.config.icon_path().exists());
    assert!(tools.calls_to(ICON_CACHE_TOOL).is_empty());
}

#[test]
fn warnings_never_abort_install() {
    let fx = Fixture::new();
    fs::remove_dir_all(&fx.config.model_dir).unwrap();
    let mut tools = FakeToolbox::healthy();
    tools.on_path.clear();

    let mut warned = Vec::new();
    let report = install_desktop_integration(&fx.config, &tools, &mut |check| {
        if let CheckOutcome::Warn(_) = check.outcome {
            warned.push(check.name);
        }
    })
    .unwrap();

    assert_eq!(warned, vec!["speech-model", "typing-tool"]);
    assert!(fx.config.icon_path().is_file());
    assert!(fx.config.desktop_entry_path().is_file());
    assert!(report.refresh.iter().all(|r| r.status == ToolStatus::NotFound));
    assert!(tools.calls_to(ICON_CACHE_TOOL).is_empty());
}

#[test]
fn caches_are_refreshed_in_user_directories() {
    let fx = Fixture::new();
    let tools = FakeToolbox::healthy();

    fx.install(&tools).unwrap();

    let theme = fx.config.icon_theme_dir().display().to_string();
    let apps = fx.config.applications_dir().display().to_string();
    assert_eq!(
        tools.calls_to(ICON_CACHE_TOOL),
        vec![vec!["-f".to_string(), "-t".to_string(), theme]]
    );
    assert_eq!(tools.calls_to(DESKTOP_DATABASE_TOOL), vec![vec![apps]]);
}

#[test]
fn missing_bundled_icon_aborts() {
    let fx = Fixture::new();
    fs::remove_file(fx.config.bundled_icon().unwrap()).unwrap();
    let tools = FakeToolbox::healthy();

    let err = fx.install(&tools).unwrap_err();

    assert!(matches!(err, PtsError::MissingAsset(_)));
    assert!(!fx.config.desktop_entry_path().exists());
}

// pts-core/src/tools.rs
//! The seam between the installer and the external utilities it shells out to.
//!
//! Every check and helper program goes through [`Toolbox`], so the only thing
//! the rest of the crate ever sees of a child process is its [`ToolStatus`].

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

/// A single external command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Discard the child's stdout and stderr instead of inheriting them.
    pub quiet: bool,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            quiet: false,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Outcome of running an external utility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// The program ran and exited successfully.
    Ran,
    /// The program ran (or could not be started) and did not succeed.
    Failed(String),
    /// The program does not exist.
    NotFound,
}

impl ToolStatus {
    pub fn success(&self) -> bool {
        matches!(self, ToolStatus::Ran)
    }
}

pub trait Toolbox {
    /// Whether `name` resolves to an executable on `PATH`.
    fn command_exists(&self, name: &str) -> bool;

    /// Runs the invocation to completion, blocking.
    fn run(&self, invocation: &Invocation) -> ToolStatus;
}

/// Runs real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemToolbox;

impl Toolbox for SystemToolbox {
    fn command_exists(&self, name: &str) -> bool {
        let found = which::which(name);
        debug!("Looking up '{}' on PATH: {:?}", name, found);
        found.is_ok()
    }

    fn run(&self, invocation: &Invocation) -> ToolStatus {
        debug!("Running: {}", invocation);
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).stdin(Stdio::null());
        if invocation.quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
        match cmd.status() {
            Ok(status) if status.success() => ToolStatus::Ran,
            Ok(status) => {
                debug!("{} exited with {}", invocation.program_name(), status);
                ToolStatus::Failed(format!("exited with {status}"))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{} not found", invocation.program.display());
                ToolStatus::NotFound
            }
            Err(e) => ToolStatus::Failed(format!(
                "could not start {}: {e}",
                invocation.program.display()
            )),
        }
    }
}

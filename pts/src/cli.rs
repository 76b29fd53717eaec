// pts/src/cli.rs
//! Defines the command-line argument structure using clap.
use clap::{ArgAction, Parser};
use pts_common::app::APP_VERSION;
use pts_common::error::Result;
use pts_common::Config;

pub mod install;
pub mod uninstall;

use crate::cli::install::Install;
use crate::cli::uninstall::Uninstall;

/// Installs (or removes) the Push-to-Talk STT launcher and icon for the current user.
#[derive(Parser, Debug)]
#[command(
    author,
    version = APP_VERSION,
    about,
    long_about = None,
    name = "pts",
    bin_name = "pts"
)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Remove the desktop entry and icon instead of installing them
    #[arg(long)]
    pub uninstall: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Install,
    Uninstall,
}

impl CliArgs {
    pub fn mode(&self) -> Mode {
        if self.uninstall {
            Mode::Uninstall
        } else {
            Mode::Install
        }
    }
}

impl Mode {
    pub fn run(self, config: &Config) -> Result<()> {
        match self {
            Self::Install => Install.run(config),
            Self::Uninstall => {
                Uninstall.run(config);
                Ok(())
            }
        }
    }
}

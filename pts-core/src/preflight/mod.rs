// pts-core/src/preflight/mod.rs
//! Ordered precondition checks run before anything is written to disk.
//!
//! Each check carries a fixed [`Severity`]. An unmet fail-severity check stops
//! the run with [`PtsError::Preflight`]; an unmet warn-severity check is
//! reported and the run continues.

pub mod checks;

use pts_common::config::Config;
use pts_common::error::{PtsError, Result};
use tracing::debug;

use crate::tools::Toolbox;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The application cannot start without this; abort.
    Fail,
    /// One feature degrades or the error surfaces later at runtime.
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Pass,
    Warn(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub severity: Severity,
    pub outcome: CheckOutcome,
}

/// `Ok(None)` when the condition holds, `Ok(Some(message))` when it does not.
/// `Err` is fatal whatever the check's severity.
pub type CheckAction = fn(&Config, &dyn Toolbox) -> Result<Option<String>>;

pub struct PreflightCheck {
    pub name: &'static str,
    pub severity: Severity,
    pub action: CheckAction,
}

/// The checks in evaluation order.
pub const CHECKS: &[PreflightCheck] = &[
    PreflightCheck {
        name: "virtualenv",
        severity: Severity::Fail,
        action: checks::virtualenv,
    },
    PreflightCheck {
        name: "speech-model",
        severity: Severity::Warn,
        action: checks::speech_model,
    },
    PreflightCheck {
        name: "python-packages",
        severity: Severity::Warn,
        action: checks::python_packages,
    },
    PreflightCheck {
        name: "gtk-bindings",
        severity: Severity::Fail,
        action: checks::gtk_bindings,
    },
    PreflightCheck {
        name: "typing-tool",
        severity: Severity::Warn,
        action: checks::typing_tool,
    },
];

/// Runs [`CHECKS`] in order, handing every result to `report` as soon as it
/// is known.
pub fn run_preflight(
    config: &Config,
    tools: &dyn Toolbox,
    report: &mut dyn FnMut(&CheckResult),
) -> Result<Vec<CheckResult>> {
    run_checks(CHECKS, config, tools, report)
}

pub fn run_checks(
    checks: &[PreflightCheck],
    config: &Config,
    tools: &dyn Toolbox,
    report: &mut dyn FnMut(&CheckResult),
) -> Result<Vec<CheckResult>> {
    let mut results = Vec::with_capacity(checks.len());
    for check in checks {
        debug!("Running preflight check '{}'", check.name);
        let outcome = match (check.action)(config, tools)? {
            None => CheckOutcome::Pass,
            Some(message) => match check.severity {
                Severity::Fail => {
                    debug!("Preflight check '{}' failed, aborting", check.name);
                    return Err(PtsError::Preflight {
                        check: check.name,
                        message,
                    });
                }
                Severity::Warn => CheckOutcome::Warn(message),
            },
        };
        let result = CheckResult {
            name: check.name,
            severity: check.severity,
            outcome,
        };
        report(&result);
        results.push(result);
    }
    Ok(results)
}

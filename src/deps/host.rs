//! The seam through which every external program is run.
//!
//! Probing and installation never spawn processes directly; they go
//! through a [`HostContext`] so tests can substitute a recorder.

use crate::error::{DepsError, Result};
use crate::shell::{self, CommandResult, Invocation};

/// Signature of the program runner.
pub type RunFn<'a> = dyn Fn(&Invocation) -> std::io::Result<CommandResult> + Sync + 'a;

/// Mockable dependencies for probing and installation.
pub struct HostContext<'a> {
    /// Run a program to completion.
    pub run: &'a RunFn<'a>,
}

/// Build the default `HostContext` for production use.
pub fn default_context() -> HostContext<'static> {
    HostContext {
        run: &shell::execute,
    }
}

impl HostContext<'_> {
    /// Run a step whose failure aborts the operation.
    ///
    /// Spawn failures and non-zero exits both become `CommandFailed`
    /// naming `step`.
    pub fn run_step(&self, step: &str, invocation: &Invocation) -> Result<CommandResult> {
        match (self.run)(invocation) {
            Ok(result) if result.success => Ok(result),
            Ok(result) => Err(DepsError::CommandFailed {
                step: step.to_string(),
                command: invocation.to_string(),
                code: result.exit_code,
            }),
            Err(e) => {
                tracing::debug!("Could not start {}: {}", invocation.program, e);
                Err(DepsError::CommandFailed {
                    step: step.to_string(),
                    command: invocation.to_string(),
                    code: None,
                })
            }
        }
    }

    /// Run a step whose failure is logged and otherwise ignored.
    pub fn run_best_effort(&self, step: &str, invocation: &Invocation) {
        match (self.run)(invocation) {
            Ok(result) if result.success => {}
            Ok(result) => {
                tracing::warn!("{} exited with {:?} (ignored)", step, result.exit_code);
            }
            Err(e) => tracing::warn!("{} could not run: {} (ignored)", step, e),
        }
    }

    /// Run a query and return its trimmed stdout, or `None` on any failure.
    pub fn query(&self, invocation: &Invocation) -> Option<String> {
        match (self.run)(invocation) {
            Ok(result) if result.success => Some(result.stdout.trim().to_string()),
            _ => None,
        }
    }
}

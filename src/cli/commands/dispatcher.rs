//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{CheckArgs, Cli, Commands};
use crate::config::load_config;
use crate::deps::{default_context, HostContext};
use crate::error::{DepsError, Result};
use crate::ui::UserInterface;

use super::check::CheckCommand;
use super::completions::CompletionsCommand;
use super::configure::ConfigureCommand;
use super::context::SetupContext;
use super::install::InstallCommand;
use super::status::StatusCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher<'h> {
    home: Option<PathBuf>,
    host: HostContext<'h>,
}

impl CommandDispatcher<'static> {
    /// Create a dispatcher that runs real programs.
    pub fn new(home: Option<PathBuf>) -> Self {
        Self::with_host(home, default_context())
    }
}

impl<'h> CommandDispatcher<'h> {
    /// Create a dispatcher with a custom program runner.
    pub fn with_host(home: Option<PathBuf>, host: HostContext<'h>) -> Self {
        Self { home, host }
    }

    /// Dispatch and execute a command.
    ///
    /// Settings are loaded once here; a missing explicit settings file or
    /// invalid YAML ends the run with exit code 2.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let Some(Commands::Completions(args)) = &cli.command {
            return CompletionsCommand::new(args.clone()).execute(ui);
        }

        let config = match load_config(cli.config.as_deref(), self.home.as_deref()) {
            Ok(c) => c,
            Err(e @ (DepsError::ConfigNotFound { .. } | DepsError::ConfigParseError { .. })) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };
        let ctx = SetupContext::new(&config, &self.host);

        match &cli.command {
            Some(Commands::Status(args)) => StatusCommand::new(&ctx, args.clone()).execute(ui),
            Some(Commands::Install(args)) => InstallCommand::new(&ctx, args.clone()).execute(ui),
            Some(Commands::Configure) => ConfigureCommand::new(&ctx).execute(ui),
            Some(Commands::Check(args)) => CheckCommand::new(&ctx, args.clone()).execute(ui),
            _ => CheckCommand::new(&ctx, CheckArgs::default()).execute(ui),
        }
    }
}

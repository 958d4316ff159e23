//! Check command implementation.
//!
//! The `sasm-deps check` command is what runs with no subcommand. It probes
//! every dependency, offers to fix what is missing, and then hands off to
//! the launcher when one is configured.

use crate::cli::args::CheckArgs;
use crate::deps::{DependencyKind, DependencySet, DependencyStatus, Presence};
use crate::error::{DepsError, Result};
use crate::shell::Invocation;
use crate::ui::{Prompt, PromptOption, PromptType, UserInterface};

use super::configure::configure_display_server;
use super::context::SetupContext;
use super::dispatcher::{Command, CommandResult};
use super::display;
use super::install::install_one;

/// The check command implementation.
pub struct CheckCommand<'a> {
    ctx: &'a SetupContext<'a>,
    args: CheckArgs,
}

impl<'a> CheckCommand<'a> {
    /// Create a new check command.
    pub fn new(ctx: &'a SetupContext<'a>, args: CheckArgs) -> Self {
        Self { ctx, args }
    }

    fn interactive(&self, ui: &dyn UserInterface) -> bool {
        ui.is_interactive() && !self.args.non_interactive
    }

    /// Offer to fix each dependency that is not ready, in order.
    ///
    /// The set is re-probed after every operation so a Homebrew install is
    /// visible to the cask installs that follow it. A dependency is offered
    /// again while its state keeps changing, so a fresh XQuartz install is
    /// followed by the offer to configure it.
    fn offer_fixes(&self, ui: &mut dyn UserInterface, mut deps: DependencySet) -> DependencySet {
        for kind in DependencyKind::ALL {
            let mut previous: Option<Presence> = None;

            loop {
                let status = deps.get(kind).clone();
                if status.is_ready() || previous.as_ref() == Some(status.presence()) {
                    break;
                }

                let needs_brew = !status.is_installed() && kind != DependencyKind::PackageManager;
                if needs_brew && !deps.package_manager.is_installed() {
                    ui.warning(&format!("{} can't be installed without Homebrew", kind));
                    break;
                }

                if !self.confirm_fix(ui, &status) {
                    tracing::debug!("Skipped {}", kind);
                    break;
                }

                let outcome = if status.needs_configuration() {
                    configure_display_server(self.ctx, ui).map(|_| ())
                } else {
                    install_one(self.ctx, ui, kind).map(|_| ())
                };
                if let Err(e) = outcome {
                    ui.error(&e.to_string());
                }

                previous = Some(status.presence().clone());
                deps = self.ctx.probe();
            }
        }
        deps
    }

    fn confirm_fix(&self, ui: &mut dyn UserInterface, status: &DependencyStatus) -> bool {
        let kind = status.kind();
        let (verb, question) = if status.needs_configuration() {
            ("configure", format!("{} needs configuration. Configure it now?", kind))
        } else {
            ("install", format!("{} is not installed. Install it now?", kind))
        };
        let prompt = Prompt::confirm(
            &format!("{}_{}", verb, display::install_name(kind)),
            &question,
            false,
        );

        match ui.prompt(&prompt) {
            Ok(answer) => answer.as_bool().unwrap_or(false),
            Err(e) => {
                tracing::warn!("Prompt failed: {}", e);
                false
            }
        }
    }

    fn ask_to_proceed(&self, ui: &mut dyn UserInterface) -> Result<bool> {
        let prompt = Prompt {
            key: "proceed".to_string(),
            question: "Some dependencies are still missing. What would you like to do?"
                .to_string(),
            prompt_type: PromptType::Select {
                options: vec![
                    PromptOption {
                        label: "Continue Anyway (May Not Work)".to_string(),
                        value: "continue".to_string(),
                    },
                    PromptOption {
                        label: "Quit".to_string(),
                        value: "quit".to_string(),
                    },
                ],
            },
            default: Some("quit".to_string()),
        };

        Ok(ui.prompt(&prompt)?.as_string() == "continue")
    }

    /// Start the configured launcher with the terminal attached.
    fn hand_off(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let launch = &self.ctx.config.launch;
        let Some(program) = &launch.command else {
            ui.success("Dependencies checked. The launcher can start.");
            return Ok(CommandResult::success());
        };

        let invocation = Invocation::new(program.as_str(), launch.args.iter().cloned()).interactive();
        tracing::info!("Starting {}", invocation);

        let result = (self.ctx.host.run)(&invocation).map_err(|e| DepsError::CommandFailed {
            step: "Start launcher".to_string(),
            command: format!("{} ({})", invocation, e),
            code: None,
        })?;

        Ok(if result.success {
            CommandResult::success()
        } else {
            CommandResult::failure(result.exit_code.unwrap_or(1))
        })
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut deps = self.ctx.probe();

        ui.show_header(display::STATUS_HEADER);
        display::show_dependencies(ui, &deps);

        if deps.all_ready() {
            ui.message("");
            ui.success("All dependencies are installed");
            return self.hand_off(ui);
        }

        let interactive = self.interactive(ui);
        if interactive {
            deps = self.offer_fixes(ui, deps);
            if deps.all_ready() {
                ui.message("");
                display::show_dependencies(ui, &deps);
                ui.success("All dependencies are installed");
                return self.hand_off(ui);
            }
        }

        ui.message("");
        if self.args.continue_anyway {
            ui.warning("Continuing with missing dependencies; the launcher may not work");
            return self.hand_off(ui);
        }

        if interactive && self.ask_to_proceed(ui)? {
            ui.warning("Continuing with missing dependencies; the launcher may not work");
            return self.hand_off(ui);
        }

        display::show_next_steps(ui, &deps);
        Ok(CommandResult::failure(1))
    }
}

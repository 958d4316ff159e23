//! Install command implementation.
//!
//! The `sasm-deps install <dependency>` command installs one dependency and
//! re-probes to confirm it.

use crate::cli::args::InstallArgs;
use crate::deps::{DependencyKind, DependencyStatus};
use crate::error::{DepsError, Result};
use crate::ui::UserInterface;

use super::context::SetupContext;
use super::dispatcher::{Command, CommandResult};
use super::display;

/// The install command implementation.
pub struct InstallCommand<'a> {
    ctx: &'a SetupContext<'a>,
    args: InstallArgs,
}

impl<'a> InstallCommand<'a> {
    /// Create a new install command.
    pub fn new(ctx: &'a SetupContext<'a>, args: InstallArgs) -> Self {
        Self { ctx, args }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let kind: DependencyKind = self.args.dependency.parse()?;

        let before = self.ctx.probe();
        let status = before.get(kind);
        if status.is_installed() {
            ui.success(&format!("{} is already installed", kind));
            if status.needs_configuration() {
                ui.show_hint(&format!("Run `{}` to finish setup", display::fix_command(status)));
            }
            return Ok(CommandResult::success());
        }

        let after = match install_one(self.ctx, ui, kind) {
            Ok(status) => status,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
        };

        ui.show_dependency(&after);
        Ok(if after.is_installed() {
            CommandResult::success()
        } else {
            ui.warning(&format!(
                "{} is still not detected. You may need to restart your terminal.",
                kind
            ));
            CommandResult::failure(1)
        })
    }
}

/// Install `kind` and return its freshly probed status.
///
/// Homebrew's installer talks to the terminal (it asks for a password), so
/// it runs in the foreground. Casks run in the background behind a spinner.
pub(crate) fn install_one(
    ctx: &SetupContext<'_>,
    ui: &mut dyn UserInterface,
    kind: DependencyKind,
) -> Result<DependencyStatus> {
    let installer = ctx.installer();

    match kind {
        DependencyKind::PackageManager => {
            if ctx.elevated {
                return Err(DepsError::Other(anyhow::anyhow!(
                    "Homebrew can't be installed as root; run sasm-deps without sudo"
                )));
            }
            ui.message("Running the Homebrew installer. It may ask for your password.");
            installer.install_package_manager()?;
            ui.success("Homebrew installed");
        }
        _ => {
            crate::runner::run_in_background(
                ui,
                &format!("Installing {}", kind),
                &format!("{} installed", kind),
                || installer.run_for(kind, false),
            )?;
        }
    }

    Ok(ctx.probe().get(kind).clone())
}

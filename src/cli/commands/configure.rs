//! Configure command implementation.
//!
//! The `sasm-deps configure` command enables TCP connections in XQuartz so
//! containers can forward X11 to it.

use crate::deps::{DependencyKind, DependencyStatus};
use crate::error::Result;
use crate::runner::run_in_background;
use crate::ui::UserInterface;

use super::context::SetupContext;
use super::dispatcher::{Command, CommandResult};

/// The configure command implementation.
pub struct ConfigureCommand<'a> {
    ctx: &'a SetupContext<'a>,
}

impl<'a> ConfigureCommand<'a> {
    /// Create a new configure command.
    pub fn new(ctx: &'a SetupContext<'a>) -> Self {
        Self { ctx }
    }
}

impl Command for ConfigureCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let status = self.ctx.prober().check_display_server();
        if !status.is_installed() {
            ui.error(status.message());
            ui.show_hint("Run `sasm-deps install xquartz` first");
            return Ok(CommandResult::failure(1));
        }

        let after = match configure_display_server(self.ctx, ui) {
            Ok(after) => after,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
        };

        ui.show_dependency(&after);
        Ok(if after.is_ready() {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        })
    }
}

/// Configure the display server and return its freshly probed status.
pub(crate) fn configure_display_server(
    ctx: &SetupContext<'_>,
    ui: &mut dyn UserInterface,
) -> Result<DependencyStatus> {
    let installer = ctx.installer();
    let kind = DependencyKind::DisplayServer;

    run_in_background(
        ui,
        &format!("Configuring {}", kind),
        &format!("{} configured", kind),
        || installer.configure_display_server(),
    )?;

    Ok(ctx.prober().check_display_server())
}

//! Status command implementation.
//!
//! The `sasm-deps status` command probes and reports without changing
//! anything. Exit code 0 means every dependency is ready.

use crate::cli::args::StatusArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::context::SetupContext;
use super::dispatcher::{Command, CommandResult};
use super::display;

/// The status command implementation.
pub struct StatusCommand<'a> {
    ctx: &'a SetupContext<'a>,
    args: StatusArgs,
}

impl<'a> StatusCommand<'a> {
    /// Create a new status command.
    pub fn new(ctx: &'a SetupContext<'a>, args: StatusArgs) -> Self {
        Self { ctx, args }
    }
}

impl Command for StatusCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let deps = self.ctx.probe();

        if self.args.json {
            let json = serde_json::to_string_pretty(&deps).map_err(anyhow::Error::from)?;
            println!("{}", json);
        } else {
            ui.show_header(display::STATUS_HEADER);
            display::show_dependencies(ui, &deps);
            if deps.all_ready() {
                ui.message("");
                ui.success("All dependencies are installed");
            } else {
                ui.message("");
                display::show_next_steps(ui, &deps);
            }
        }

        Ok(if deps.all_ready() {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        })
    }
}

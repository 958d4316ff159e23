//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads settings
//! once and hands every command the same [`SetupContext`]. This allows:
//! - Single binary with subcommands (`sasm-deps check`, `sasm-deps status`)
//! - Shared initialization logic
//! - Consistent global flag handling

pub mod check;
pub mod completions;
pub mod configure;
pub mod context;
pub mod dispatcher;
pub mod display;
pub mod install;
pub mod status;

pub use context::SetupContext;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};

//! External program execution and process environment checks.

pub mod command;
pub mod platform;

pub use command::{execute, CommandResult, Invocation};
pub use platform::{is_ci, is_elevated};

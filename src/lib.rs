//! sasm-deps - Dependency checker and installer for the SASM launcher.
//!
//! The launcher runs its tools in containers and forwards their GUIs over
//! X11, so a Mac needs three things before it can start: Homebrew, Docker
//! Desktop, and XQuartz configured to accept TCP connections. This crate
//! probes for each, installs what is missing, configures XQuartz, and then
//! hands off to the launcher.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings file loading and defaults
//! - [`deps`] - Dependency probing, installation and configuration
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Background execution behind a spinner
//! - [`shell`] - External program execution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use sasm_deps::deps::DependencyKind;
//!
//! let kind: DependencyKind = "docker".parse().unwrap();
//! assert_eq!(kind.display_name(), "Docker");
//! ```
//!
//! Probing touches the filesystem and runs programs; see the integration
//! tests for how to point it at a sandbox.

pub mod cli;
pub mod config;
pub mod deps;
pub mod error;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{DepsError, Result};

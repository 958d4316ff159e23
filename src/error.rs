//! Error types for dependency setup.
//!
//! This module defines [`DepsError`], the error type returned by installer
//! operations, configuration loading and the CLI, plus a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - Probing never returns an error: every check degrades to "not installed"
//!   or "not configured" on its own.
//! - Installer failures carry the step that failed so the caller can show it
//!   and offer a retry.
//! - Use `anyhow::Error` (via `DepsError::Other`) for unexpected errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dependency setup.
#[derive(Debug, Error)]
pub enum DepsError {
    /// Settings file passed explicitly does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// An install that goes through the package manager was attempted
    /// while the package manager itself is absent.
    #[error("Homebrew is required to install {dependency}")]
    PackageManagerRequired { dependency: String },

    /// An external command exited unsuccessfully or could not be spawned.
    #[error("{step} failed (exit code {code:?}): {command}")]
    CommandFailed {
        step: String,
        command: String,
        code: Option<i32>,
    },

    /// A file-content step of the preference edit failed.
    #[error("Failed to {step}: {message}")]
    ConfigureFailed { step: String, message: String },

    /// Dependency name given on the command line is not one we manage.
    #[error("Unknown dependency: {name}")]
    UnknownDependency { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DepsError {
    /// Whether this error was raised before any external command ran.
    pub fn is_precondition(&self) -> bool {
        matches!(self, DepsError::PackageManagerRequired { .. })
    }
}

/// Result type alias for dependency setup.
pub type Result<T> = std::result::Result<T, DepsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = DepsError::ConfigNotFound {
            path: PathBuf::from("/foo/dependencies.yml"),
        };
        assert!(err.to_string().contains("/foo/dependencies.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = DepsError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn package_manager_required_names_dependency() {
        let err = DepsError::PackageManagerRequired {
            dependency: "Docker".into(),
        };
        assert_eq!(err.to_string(), "Homebrew is required to install Docker");
        assert!(err.is_precondition());
    }

    #[test]
    fn command_failed_displays_step_command_and_code() {
        let err = DepsError::CommandFailed {
            step: "Install Docker".into(),
            command: "brew install --cask docker".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("Install Docker"));
        assert!(msg.contains("brew install --cask docker"));
        assert!(msg.contains("1"));
        assert!(!err.is_precondition());
    }

    #[test]
    fn configure_failed_displays_step_and_message() {
        let err = DepsError::ConfigureFailed {
            step: "write preference file".into(),
            message: "permission denied".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to write preference file: permission denied"
        );
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DepsError = io_err.into();
        assert!(matches!(err, DepsError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts() {
        let err: DepsError = anyhow::anyhow!("worker panicked").into();
        assert_eq!(err.to_string(), "worker panicked");
    }
}

//! Dependency probing and installation.
//!
//! The launcher needs three things on the host: Homebrew, Docker and a
//! configured XQuartz. [`Prober`] reports where each stands as an immutable
//! [`DependencySet`]; [`Installer`] installs or configures one of them.
//! Callers re-probe after an installer operation instead of patching the
//! previous snapshot.
//!
//! All external programs run through a [`HostContext`], which tests replace
//! with a recorder.

pub mod host;
pub mod installer;
pub mod preferences;
pub mod probe;
pub mod status;

#[cfg(test)]
pub(crate) mod fixtures;

pub use host::{default_context, HostContext, RunFn};
pub use installer::Installer;
pub use preferences::{DefaultsReader, PlistFileReader, PreferenceReader};
pub use probe::{resolve_tool_path, Prober};
pub use status::{DependencyKind, DependencySet, DependencyStatus, Presence};

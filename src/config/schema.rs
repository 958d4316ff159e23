//! Settings schema definitions.
//!
//! These structs map to the YAML settings file. Every field has a default
//! matching a stock macOS install, so an empty file (or no file at all)
//! yields a working configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root settings structure for `dependencies.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DepsConfig {
    /// Homebrew location and installer.
    pub package_manager: PackageManagerConfig,

    /// Docker locations and cask.
    pub container_runtime: ContainerRuntimeConfig,

    /// XQuartz locations, cask and preference file.
    pub display_server: DisplayServerConfig,

    /// Downstream application started once dependencies are satisfied.
    pub launch: LaunchConfig,
}

/// Package manager settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageManagerConfig {
    /// Binary name resolved on the search path.
    pub binary: String,

    /// Remote install script run through the system shell.
    pub install_script_url: String,

    /// Directories searched after PATH. A fresh install lands here before
    /// the user's shell profile picks it up.
    #[serde(default = "default_brew_prefixes")]
    pub extra_search_paths: Vec<PathBuf>,
}

impl Default for PackageManagerConfig {
    fn default() -> Self {
        Self {
            binary: "brew".to_string(),
            install_script_url: "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh"
                .to_string(),
            extra_search_paths: default_brew_prefixes(),
        }
    }
}

/// Container runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerRuntimeConfig {
    /// Application bundle checked first.
    pub app_bundle: PathBuf,

    /// Binary name resolved on the search path.
    pub binary: String,

    /// Fixed binary path checked last.
    pub fixed_binary: PathBuf,

    /// Homebrew cask identifier.
    pub cask: String,
}

impl Default for ContainerRuntimeConfig {
    fn default() -> Self {
        Self {
            app_bundle: PathBuf::from("/Applications/Docker.app"),
            binary: "docker".to_string(),
            fixed_binary: PathBuf::from("/usr/local/bin/docker"),
            cask: "docker".to_string(),
        }
    }
}

/// How the display-server preference value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceReaderKind {
    /// `defaults read <domain> <key>`
    Defaults,
    /// Parse the textual property list directly.
    File,
}

impl Default for PreferenceReaderKind {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self::Defaults
        } else {
            Self::File
        }
    }
}

/// Display server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayServerConfig {
    /// Application bundle whose presence means "installed".
    pub app_bundle: PathBuf,

    /// Homebrew cask identifier.
    pub cask: String,

    /// Process terminated after configuration so it reloads preferences.
    pub process_name: String,

    /// Preference domain passed to `defaults`.
    pub preference_domain: String,

    /// Preference key controlling the TCP listener.
    pub preference_key: String,

    /// Per-user preference file.
    #[serde(default = "default_preference_file")]
    pub preference_file: PathBuf,

    /// Reader used by the probe.
    pub preference_reader: PreferenceReaderKind,

    /// Preference daemon stopped around the file edit.
    pub preference_daemon: String,
}

impl Default for DisplayServerConfig {
    fn default() -> Self {
        Self {
            app_bundle: PathBuf::from("/Applications/Utilities/XQuartz.app"),
            cask: "xquartz".to_string(),
            process_name: "XQuartz".to_string(),
            preference_domain: XQUARTZ_DOMAIN.to_string(),
            preference_key: "nolisten_tcp".to_string(),
            preference_file: default_preference_file(),
            preference_reader: PreferenceReaderKind::default(),
            preference_daemon: "com.apple.cfprefsd.xpc.agent".to_string(),
        }
    }
}

/// Hand-off target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Program to start; nothing is spawned when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Arguments passed to the program.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

const XQUARTZ_DOMAIN: &str = "org.macosforge.xquartz.X11";

fn default_brew_prefixes() -> Vec<PathBuf> {
    if cfg!(target_arch = "aarch64") {
        vec![PathBuf::from("/opt/homebrew/bin")]
    } else {
        vec![PathBuf::from("/usr/local/bin")]
    }
}

fn default_preference_file() -> PathBuf {
    let home = super::loader::home_dir().unwrap_or_else(|| PathBuf::from("/"));
    preference_file_in(&home, XQUARTZ_DOMAIN)
}

/// Location of a domain's preference file under a home directory.
pub fn preference_file_in(home: &Path, domain: &str) -> PathBuf {
    home.join("Library/Preferences")
        .join(format!("{}.plist", domain))
}

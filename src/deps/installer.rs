//! Dependency installation and display-server configuration.
//!
//! Every operation is a linear sequence of steps that stops at the first
//! failing step. Errors name the step and the command that failed.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::host::HostContext;
use super::preferences::{is_textual, set_bool_key, MINIMAL_PLIST};
use super::probe::{default_search_path, resolve_tool_path};
use super::status::DependencyKind;
use crate::config::DepsConfig;
use crate::error::{DepsError, Result};
use crate::shell::Invocation;

/// Serializes configure sequences; they share the scratch file path.
static CONFIGURE_LOCK: Mutex<()> = Mutex::new(());

/// Suffix of the scratch copy written next to the preference file.
const SCRATCH_SUFFIX: &str = ".sasm-tmp";

/// Runs installation and configuration commands.
pub struct Installer<'a> {
    config: &'a DepsConfig,
    host: &'a HostContext<'a>,
    search_path: Vec<PathBuf>,
}

impl<'a> Installer<'a> {
    pub fn new(config: &'a DepsConfig, host: &'a HostContext<'a>) -> Self {
        Self::with_search_path(config, host, default_search_path(config))
    }

    /// Resolve the package manager against an explicit search path.
    pub fn with_search_path(
        config: &'a DepsConfig,
        host: &'a HostContext<'a>,
        search_path: Vec<PathBuf>,
    ) -> Self {
        Self {
            config,
            host,
            search_path,
        }
    }

    /// Run the operation that makes `kind` ready.
    ///
    /// An installed but unconfigured display server is configured instead
    /// of reinstalled when `configure_only` is set.
    pub fn run_for(&self, kind: DependencyKind, configure_only: bool) -> Result<()> {
        match kind {
            DependencyKind::PackageManager => self.install_package_manager(),
            DependencyKind::ContainerRuntime => self.install_container_runtime(),
            DependencyKind::DisplayServer if configure_only => self.configure_display_server(),
            DependencyKind::DisplayServer => self.install_display_server(),
        }
    }

    /// Run the Homebrew install script through the system shell.
    ///
    /// The script asks for confirmation and a sudo password, so it runs
    /// attached to the terminal.
    pub fn install_package_manager(&self) -> Result<()> {
        let url = &self.config.package_manager.install_script_url;
        let script = format!("/bin/bash -c \"$(curl -fsSL {})\"", url);
        let invocation = Invocation::new("/bin/bash", ["-c".to_string(), script]).interactive();

        tracing::info!("Installing Homebrew from {}", url);
        self.host.run_step("Install Homebrew", &invocation)?;
        Ok(())
    }

    pub fn install_container_runtime(&self) -> Result<()> {
        let cask = self.config.container_runtime.cask.clone();
        self.install_cask(DependencyKind::ContainerRuntime, &cask)
    }

    pub fn install_display_server(&self) -> Result<()> {
        let cask = self.config.display_server.cask.clone();
        self.install_cask(DependencyKind::DisplayServer, &cask)
    }

    fn install_cask(&self, kind: DependencyKind, cask: &str) -> Result<()> {
        let brew = self.package_manager().ok_or_else(|| DepsError::PackageManagerRequired {
            dependency: kind.display_name().to_string(),
        })?;

        let invocation = Invocation::new(
            brew.to_string_lossy(),
            ["install", "--cask", cask],
        );
        tracing::info!("Installing {} with {}", kind, invocation);
        self.host
            .run_step(&format!("Install {}", kind), &invocation)?;
        Ok(())
    }

    /// Resolve the package manager fresh, so an install made earlier in
    /// this process is visible.
    fn package_manager(&self) -> Option<PathBuf> {
        resolve_tool_path(&self.config.package_manager.binary, &self.search_path)
    }

    /// Enable TCP connections in XQuartz's preferences.
    ///
    /// The preference daemon is stopped while the file is edited and
    /// restarted afterwards. The edit is written to a scratch file and
    /// renamed over the original, so the preference file is either the old
    /// content or the new content. Running this twice leaves one key.
    ///
    /// Daemon and process management failures are logged and ignored; only
    /// the file steps return errors.
    pub fn configure_display_server(&self) -> Result<()> {
        let _guard = CONFIGURE_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let cfg = &self.config.display_server;
        let daemon = cfg.preference_daemon.as_str();
        let scratch = scratch_path(&cfg.preference_file);

        self.host.run_best_effort(
            "Stop preference daemon",
            &Invocation::new("launchctl", ["stop", daemon]),
        );

        let result = self.rewrite_preference_file(&cfg.preference_file, &scratch);

        self.host.run_best_effort(
            "Start preference daemon",
            &Invocation::new("launchctl", ["start", daemon]),
        );

        if scratch.exists() {
            if let Err(e) = fs::remove_file(&scratch) {
                tracing::warn!("Could not remove {}: {}", scratch.display(), e);
            }
        }

        result?;

        self.host.run_best_effort(
            &format!("Stop {}", cfg.process_name),
            &Invocation::new("killall", [cfg.process_name.as_str()]),
        );

        tracing::info!("{} configured", DependencyKind::DisplayServer);
        Ok(())
    }

    fn rewrite_preference_file(&self, target: &Path, scratch: &Path) -> Result<()> {
        let key = &self.config.display_server.preference_key;

        let mut permissions = None;
        let original = if target.exists() {
            permissions = Some(
                fs::metadata(target)
                    .map_err(|e| configure_err("read preference file", e))?
                    .permissions(),
            );
            let bytes = fs::read(target).map_err(|e| configure_err("read preference file", e))?;
            match String::from_utf8(bytes) {
                Ok(text) if is_textual(&text) => text,
                Ok(text) => self.convert_to_xml(text.into_bytes(), scratch)?,
                Err(e) => self.convert_to_xml(e.into_bytes(), scratch)?,
            }
        } else {
            tracing::debug!(
                "Creating preference file {}",
                target.display()
            );
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| configure_err("create preferences directory", e))?;
            }
            MINIMAL_PLIST.to_string()
        };

        let edited = set_bool_key(&original, key, false).ok_or_else(|| DepsError::ConfigureFailed {
            step: "update preference file".to_string(),
            message: format!("no dictionary found in {}", target.display()),
        })?;

        fs::write(scratch, edited).map_err(|e| configure_err("write preference file", e))?;
        // The rename replaces the target's mode with the scratch file's.
        if let Some(permissions) = permissions {
            fs::set_permissions(scratch, permissions)
                .map_err(|e| configure_err("copy preference file permissions", e))?;
        }
        fs::rename(scratch, target).map_err(|e| configure_err("replace preference file", e))?;
        Ok(())
    }

    /// Copy a binary property list to the scratch path and convert it to
    /// XML in place.
    fn convert_to_xml(&self, bytes: Vec<u8>, scratch: &Path) -> Result<String> {
        fs::write(scratch, bytes).map_err(|e| configure_err("copy preference file", e))?;

        let scratch_arg = scratch.to_string_lossy().to_string();
        self.host.run_step(
            "Convert preference file",
            &Invocation::new("plutil", ["-convert".to_string(), "xml1".to_string(), scratch_arg]),
        )?;

        fs::read_to_string(scratch).map_err(|e| configure_err("read converted preference file", e))
    }
}

/// `<file>.sasm-tmp` beside `file`.
fn scratch_path(file: &Path) -> PathBuf {
    let mut name: OsString = file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(SCRATCH_SUFFIX);
    file.with_file_name(name)
}

fn configure_err(step: &str, error: impl std::fmt::Display) -> DepsError {
    DepsError::ConfigureFailed {
        step: step.to_string(),
        message: error.to_string(),
    }
}

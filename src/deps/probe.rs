//! Dependency probe.
//!
//! The [`Prober`] inspects the machine for the package manager, the
//! container runtime and the display server, and returns a fresh
//! [`DependencySet`]. Probing is read-only and never fails: anything that
//! cannot be determined is reported as "not installed" or "not configured".
//!
//! # Example
//!
//! ```no_run
//! use sasm_deps::config::DepsConfig;
//! use sasm_deps::deps::{default_context, Prober};
//!
//! let config = DepsConfig::default();
//! let host = default_context();
//! let deps = Prober::new(&config, &host).probe_all();
//! for status in deps.iter() {
//!     println!("{}: {}", status.name(), status.message());
//! }
//! ```

use std::path::{Path, PathBuf};

use super::host::HostContext;
use super::preferences::{DefaultsReader, PlistFileReader, PreferenceReader};
use super::status::{DependencyKind, DependencySet, DependencyStatus};
use crate::config::{DepsConfig, PreferenceReaderKind};

/// Value `defaults read` prints when XQuartz accepts TCP connections.
pub const CONFIGURED_SENTINEL: &str = "0";

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over search path entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// The process PATH followed by the package manager's default prefixes.
pub fn default_search_path(config: &DepsConfig) -> Vec<PathBuf> {
    let mut search_path = parse_system_path();
    for dir in &config.package_manager.extra_search_paths {
        if !search_path.contains(dir) {
            search_path.push(dir.clone());
        }
    }
    search_path
}

/// Inspects the machine for the three dependencies.
pub struct Prober<'a> {
    config: &'a DepsConfig,
    host: &'a HostContext<'a>,
    search_path: Vec<PathBuf>,
}

impl<'a> Prober<'a> {
    /// Probe using the process PATH followed by the configured extra
    /// directories.
    pub fn new(config: &'a DepsConfig, host: &'a HostContext<'a>) -> Self {
        Self::with_search_path(config, host, default_search_path(config))
    }

    /// Probe using an explicit search path.
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

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Probe every dependency in one pass.
    pub fn probe_all(&self) -> DependencySet {
        let set = DependencySet {
            package_manager: self.check_package_manager(),
            container_runtime: self.check_container_runtime(),
            display_server: self.check_display_server(),
        };
        for status in set.iter() {
            tracing::debug!("{}: {}", status.name(), status.message());
        }
        set
    }

    /// Where the package manager binary resolves, if anywhere.
    pub fn package_manager_path(&self) -> Option<PathBuf> {
        resolve_tool_path(&self.config.package_manager.binary, &self.search_path)
    }

    pub fn check_package_manager(&self) -> DependencyStatus {
        match self.package_manager_path() {
            Some(path) => DependencyStatus::installed(
                DependencyKind::PackageManager,
                path,
                "Homebrew is installed",
            ),
            None => DependencyStatus::missing(
                DependencyKind::PackageManager,
                "Homebrew not found - required for installing other dependencies",
            ),
        }
    }

    /// Application bundle, then the search path, then the fixed binary.
    pub fn check_container_runtime(&self) -> DependencyStatus {
        let cfg = &self.config.container_runtime;
        let kind = DependencyKind::ContainerRuntime;

        if cfg.app_bundle.exists() {
            return DependencyStatus::installed(
                kind,
                cfg.app_bundle.clone(),
                "Docker Desktop is installed",
            );
        }

        if let Some(path) = resolve_tool_path(&cfg.binary, &self.search_path) {
            return DependencyStatus::installed(kind, path, "Docker is installed");
        }

        if cfg.fixed_binary.exists() {
            return DependencyStatus::installed(
                kind,
                cfg.fixed_binary.clone(),
                "Docker is installed",
            );
        }

        DependencyStatus::missing(
            kind,
            "Docker Desktop not found - required for running containers",
        )
    }

    pub fn check_display_server(&self) -> DependencyStatus {
        let cfg = &self.config.display_server;
        let kind = DependencyKind::DisplayServer;

        if !cfg.app_bundle.exists() {
            return DependencyStatus::missing(
                kind,
                "XQuartz not found - required for X11 forwarding",
            );
        }

        if self.is_display_server_configured() {
            DependencyStatus::installed(
                kind,
                cfg.app_bundle.clone(),
                "XQuartz is installed and configured",
            )
        } else {
            DependencyStatus::unconfigured(
                kind,
                cfg.app_bundle.clone(),
                "XQuartz is installed but needs configuration",
            )
        }
    }

    /// Whether the stored listener preference equals the sentinel.
    ///
    /// A missing preference file or a failing reader means "not configured".
    pub fn is_display_server_configured(&self) -> bool {
        let cfg = &self.config.display_server;

        if !cfg.preference_file.exists() {
            tracing::debug!(
                "No preference file at {}",
                cfg.preference_file.display()
            );
            return false;
        }

        let value = match cfg.preference_reader {
            PreferenceReaderKind::Defaults => {
                DefaultsReader::new(self.host).read(&cfg.preference_domain, &cfg.preference_key)
            }
            PreferenceReaderKind::File => PlistFileReader::new(&cfg.preference_file)
                .read(&cfg.preference_domain, &cfg.preference_key),
        };

        value.as_deref() == Some(CONFIGURED_SENTINEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps::fixtures::{create_fake_binary, sandbox_config};
    use crate::deps::host::testing::RecordingHost;
    use crate::deps::preferences::MINIMAL_PLIST;
    use crate::shell::Invocation;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn create_non_executable_file(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "not executable").unwrap();
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o644)).unwrap();
    }

    #[test]
    fn resolve_tool_path_finds_first_match() {
        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");

        create_fake_binary(&dir_a.join("brew"));
        create_fake_binary(&dir_b.join("brew"));

        let result = resolve_tool_path("brew", &[dir_a.clone(), dir_b.clone()]);
        assert_eq!(result, Some(dir_a.join("brew")));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_tool_path_skips_non_executable() {
        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");

        create_non_executable_file(&dir_a.join("docker"));
        create_fake_binary(&dir_b.join("docker"));

        let result = resolve_tool_path("docker", &[dir_a, dir_b.clone()]);
        assert_eq!(result, Some(dir_b.join("docker")));
    }

    #[test]
    fn nothing_present_reports_three_missing_with_empty_paths() {
        let temp = TempDir::new().unwrap();
        let config = sandbox_config(temp.path());
        let rec = RecordingHost::new();
        let run = |inv: &Invocation| rec.run(inv);
        let host = HostContext { run: &run };

        let deps = Prober::with_search_path(&config, &host, vec![temp.path().join("bin")])
            .probe_all();

        for status in deps.iter() {
            assert!(!status.is_installed(), "{} should be missing", status.name());
            assert!(status.path().is_none());
        }
        assert_eq!(
            deps.package_manager.message(),
            "Homebrew not found - required for installing other dependencies"
        );
        assert!(rec.calls().is_empty(), "probing should not run programs here");
    }

    #[test]
    fn package_manager_found_on_search_path() {
        let temp = TempDir::new().unwrap();
        let config = sandbox_config(temp.path());
        let bin = temp.path().join("opt/homebrew/bin");
        create_fake_binary(&bin.join("brew"));
        let rec = RecordingHost::new();
        let run = |inv: &Invocation| rec.run(inv);
        let host = HostContext { run: &run };

        let status =
            Prober::with_search_path(&config, &host, vec![bin.clone()]).check_package_manager();

        assert!(status.is_ready());
        assert_eq!(status.path(), Some(bin.join("brew").as_path()));
        assert_eq!(status.message(), "Homebrew is installed");
    }

    #[test]
    fn extra_search_paths_are_appended() {
        let temp = TempDir::new().unwrap();
        let mut config = sandbox_config(temp.path());
        let brew_bin = temp.path().join("opt/homebrew/bin");
        config.package_manager.extra_search_paths = vec![brew_bin.clone()];
        let rec = RecordingHost::new();
        let run = |inv: &Invocation| rec.run(inv);
        let host = HostContext { run: &run };

        let prober = Prober::new(&config, &host);
        assert_eq!(prober.search_path().last(), Some(&brew_bin));
    }

    #[test]
    fn container_runtime_bundle_short_circuits_path_lookup() {
        let temp = TempDir::new().unwrap();
        let config = sandbox_config(temp.path());
        fs::create_dir_all(&config.container_runtime.app_bundle).unwrap();
        let bin = temp.path().join("bin");
        create_fake_binary(&bin.join("docker"));
        let rec = RecordingHost::new();
        let run = |inv: &Invocation| rec.run(inv);
        let host = HostContext { run: &run };

        let status =
            Prober::with_search_path(&config, &host, vec![bin]).check_container_runtime();

        assert_eq!(
            status.path(),
            Some(config.container_runtime.app_bundle.as_path())
        );
        assert_eq!(status.message(), "Docker Desktop is installed");
    }

    #[test]
    fn container_runtime_found_on_search_path() {
        let temp = TempDir::new().unwrap();
        let config = sandbox_config(temp.path());
        let bin = temp.path().join("bin");
        create_fake_binary(&bin.join("docker"));
        create_fake_binary(&config.container_runtime.fixed_binary);
        let rec = RecordingHost::new();
        let run = |inv: &Invocation| rec.run(inv);
        let host = HostContext { run: &run };

        let status =
            Prober::with_search_path(&config, &host, vec![bin.clone()]).check_container_runtime();

        assert_eq!(status.path(), Some(bin.join("docker").as_path()));
        assert_eq!(status.message(), "Docker is installed");
    }

    #[test]
    fn container_runtime_falls_back_to_fixed_binary() {
        let temp = TempDir::new().unwrap();
        let config = sandbox_config(temp.path());
        create_fake_binary(&config.container_runtime.fixed_binary);
        let rec = RecordingHost::new();
        let run = |inv: &Invocation| rec.run(inv);
        let host = HostContext { run: &run };

        let status = Prober::with_search_path(&config, &host, vec![]).check_container_runtime();

        assert_eq!(
            status.path(),
            Some(config.container_runtime.fixed_binary.as_path())
        );
    }

    #[test]
    fn display_server_without_preference_file_needs_configuration() {
        let temp = TempDir::new().unwrap();
        let config = sandbox_config(temp.path());
        fs::create_dir_all(&config.display_server.app_bundle).unwrap();
        let rec = RecordingHost::new();
        let run = |inv: &Invocation| rec.run(inv);
        let host = HostContext { run: &run };

        let status = Prober::with_search_path(&config, &host, vec![]).check_display_server();

        assert!(status.is_installed());
        assert!(status.needs_configuration());
        assert_eq!(
            status.message(),
            "XQuartz is installed but needs configuration"
        );
    }

    #[test]
    fn display_server_configured_when_sentinel_present() {
        let temp = TempDir::new().unwrap();
        let config = sandbox_config(temp.path());
        fs::create_dir_all(&config.display_server.app_bundle).unwrap();
        let pref = &config.display_server.preference_file;
        fs::create_dir_all(pref.parent().unwrap()).unwrap();
        fs::write(
            pref,
            MINIMAL_PLIST.replace("<dict>\n", "<dict>\n\t<key>nolisten_tcp</key>\n\t<false/>\n"),
        )
        .unwrap();
        let rec = RecordingHost::new();
        let run = |inv: &Invocation| rec.run(inv);
        let host = HostContext { run: &run };

        let status = Prober::with_search_path(&config, &host, vec![]).check_display_server();

        assert!(status.is_ready());
        assert_eq!(status.message(), "XQuartz is installed and configured");
    }

    #[test]
    fn display_server_other_value_is_unconfigured() {
        let temp = TempDir::new().unwrap();
        let config = sandbox_config(temp.path());
        fs::create_dir_all(&config.display_server.app_bundle).unwrap();
        let pref = &config.display_server.preference_file;
        fs::create_dir_all(pref.parent().unwrap()).unwrap();
        fs::write(
            pref,
            MINIMAL_PLIST.replace("<dict>\n", "<dict>\n\t<key>nolisten_tcp</key>\n\t<true/>\n"),
        )
        .unwrap();
        let rec = RecordingHost::new();
        let run = |inv: &Invocation| rec.run(inv);
        let host = HostContext { run: &run };

        let status = Prober::with_search_path(&config, &host, vec![]).check_display_server();
        assert!(status.needs_configuration());
    }

    #[test]
    fn defaults_reader_failure_degrades_to_unconfigured() {
        let temp = TempDir::new().unwrap();
        let mut config = sandbox_config(temp.path());
        config.display_server.preference_reader = PreferenceReaderKind::Defaults;
        fs::create_dir_all(&config.display_server.app_bundle).unwrap();
        let pref = &config.display_server.preference_file;
        fs::create_dir_all(pref.parent().unwrap()).unwrap();
        fs::write(pref, MINIMAL_PLIST).unwrap();
        let rec = RecordingHost::new().unspawnable("defaults");
        let run = |inv: &Invocation| rec.run(inv);
        let host = HostContext { run: &run };

        let status = Prober::with_search_path(&config, &host, vec![]).check_display_server();

        assert!(status.needs_configuration());
        assert_eq!(rec.programs(), vec!["defaults"]);
    }

    #[test]
    fn defaults_reader_sentinel_means_configured() {
        let temp = TempDir::new().unwrap();
        let mut config = sandbox_config(temp.path());
        config.display_server.preference_reader = PreferenceReaderKind::Defaults;
        fs::create_dir_all(&config.display_server.app_bundle).unwrap();
        let pref = &config.display_server.preference_file;
        fs::create_dir_all(pref.parent().unwrap()).unwrap();
        fs::write(pref, b"bplist00").unwrap();
        let rec = RecordingHost::new().respond("defaults", "0\n");
        let run = |inv: &Invocation| rec.run(inv);
        let host = HostContext { run: &run };

        let prober = Prober::with_search_path(&config, &host, vec![]);
        assert!(prober.is_display_server_configured());
    }

    #[test]
    fn missing_display_server_skips_preference_read() {
        let temp = TempDir::new().unwrap();
        let mut config = sandbox_config(temp.path());
        config.display_server.preference_reader = PreferenceReaderKind::Defaults;
        let rec = RecordingHost::new();
        let run = |inv: &Invocation| rec.run(inv);
        let host = HostContext { run: &run };

        let status = Prober::with_search_path(&config, &host, vec![]).check_display_server();

        assert!(!status.is_installed());
        assert!(rec.calls().is_empty());
    }
}

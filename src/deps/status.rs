//! Dependency status snapshots.
//!
//! Each probe produces a fresh [`DependencySet`] holding one
//! [`DependencyStatus`] per dependency. Snapshots are immutable; callers
//! re-probe instead of patching them.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::DepsError;

/// The three dependencies the launcher needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// Homebrew.
    PackageManager,
    /// Docker.
    ContainerRuntime,
    /// XQuartz.
    DisplayServer,
}

impl DependencyKind {
    /// All kinds in probe order.
    pub const ALL: [DependencyKind; 3] = [
        DependencyKind::PackageManager,
        DependencyKind::ContainerRuntime,
        DependencyKind::DisplayServer,
    ];

    /// Human-readable product name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PackageManager => "Homebrew",
            Self::ContainerRuntime => "Docker",
            Self::DisplayServer => "XQuartz",
        }
    }

    /// Identifier used on the command line.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::PackageManager => "package-manager",
            Self::ContainerRuntime => "container-runtime",
            Self::DisplayServer => "display-server",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DependencyKind {
    type Err = DepsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "package-manager" | "homebrew" | "brew" => Ok(Self::PackageManager),
            "container-runtime" | "docker" => Ok(Self::ContainerRuntime),
            "display-server" | "xquartz" => Ok(Self::DisplayServer),
            _ => Err(DepsError::UnknownDependency {
                name: s.to_string(),
            }),
        }
    }
}

/// Whether a dependency is present, and for the display server whether it
/// is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    /// Not found anywhere.
    Missing,
    /// Found and ready.
    Installed { path: PathBuf },
    /// Found but its preference still needs editing.
    Unconfigured { path: PathBuf },
}

/// Status of one dependency at probe time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyStatus {
    kind: DependencyKind,
    presence: Presence,
    message: String,
}

impl DependencyStatus {
    /// A dependency that was not found.
    pub fn missing(kind: DependencyKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            presence: Presence::Missing,
            message: message.into(),
        }
    }

    /// A dependency found at `path`.
    pub fn installed(kind: DependencyKind, path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            kind,
            presence: Presence::Installed { path },
            message: message.into(),
        }
    }

    /// A dependency found at `path` that still needs configuration.
    pub fn unconfigured(kind: DependencyKind, path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            kind,
            presence: Presence::Unconfigured { path },
            message: message.into(),
        }
    }

    pub fn kind(&self) -> DependencyKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }

    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the dependency was found, configured or not.
    pub fn is_installed(&self) -> bool {
        !matches!(self.presence, Presence::Missing)
    }

    /// Where it was found. Always `None` when not installed.
    pub fn path(&self) -> Option<&Path> {
        match &self.presence {
            Presence::Missing => None,
            Presence::Installed { path } | Presence::Unconfigured { path } => Some(path),
        }
    }

    /// Installed but not yet configured.
    pub fn needs_configuration(&self) -> bool {
        matches!(self.presence, Presence::Unconfigured { .. })
    }

    /// Installed and configured.
    pub fn is_ready(&self) -> bool {
        matches!(self.presence, Presence::Installed { .. })
    }
}

impl Serialize for DependencyStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let state = match self.presence {
            Presence::Missing => "missing",
            Presence::Installed { .. } => "installed",
            Presence::Unconfigured { .. } => "unconfigured",
        };
        let path = self
            .path()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut s = serializer.serialize_struct("DependencyStatus", 6)?;
        s.serialize_field("name", self.name())?;
        s.serialize_field("kind", &self.kind)?;
        s.serialize_field("installed", &self.is_installed())?;
        s.serialize_field("path", &path)?;
        s.serialize_field("state", state)?;
        s.serialize_field("message", &self.message)?;
        s.end()
    }
}

/// One status per dependency, produced by a single probe pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencySet {
    pub package_manager: DependencyStatus,
    pub container_runtime: DependencyStatus,
    pub display_server: DependencyStatus,
}

impl DependencySet {
    /// Statuses in fixed order.
    pub fn iter(&self) -> impl Iterator<Item = &DependencyStatus> {
        [
            &self.package_manager,
            &self.container_runtime,
            &self.display_server,
        ]
        .into_iter()
    }

    pub fn get(&self, kind: DependencyKind) -> &DependencyStatus {
        match kind {
            DependencyKind::PackageManager => &self.package_manager,
            DependencyKind::ContainerRuntime => &self.container_runtime,
            DependencyKind::DisplayServer => &self.display_server,
        }
    }

    /// Every dependency installed and configured.
    pub fn all_ready(&self) -> bool {
        self.iter().all(DependencyStatus::is_ready)
    }

    /// Anything missing or still needing configuration.
    pub fn has_missing(&self) -> bool {
        !self.all_ready()
    }

    /// Dependencies that are not ready, in fixed order.
    pub fn missing(&self) -> Vec<&DependencyStatus> {
        self.iter().filter(|s| !s.is_ready()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_set() -> DependencySet {
        DependencySet {
            package_manager: DependencyStatus::installed(
                DependencyKind::PackageManager,
                PathBuf::from("/opt/homebrew/bin/brew"),
                "Homebrew is installed",
            ),
            container_runtime: DependencyStatus::installed(
                DependencyKind::ContainerRuntime,
                PathBuf::from("/Applications/Docker.app"),
                "Docker Desktop is installed",
            ),
            display_server: DependencyStatus::installed(
                DependencyKind::DisplayServer,
                PathBuf::from("/Applications/Utilities/XQuartz.app"),
                "XQuartz is installed and configured",
            ),
        }
    }

    #[test]
    fn missing_has_no_path() {
        let status = DependencyStatus::missing(DependencyKind::ContainerRuntime, "not found");
        assert!(!status.is_installed());
        assert!(status.path().is_none());
        assert!(!status.is_ready());
    }

    #[test]
    fn unconfigured_is_installed_but_not_ready() {
        let status = DependencyStatus::unconfigured(
            DependencyKind::DisplayServer,
            PathBuf::from("/Applications/Utilities/XQuartz.app"),
            "needs configuration",
        );
        assert!(status.is_installed());
        assert!(status.needs_configuration());
        assert!(!status.is_ready());
        assert_eq!(
            status.path(),
            Some(Path::new("/Applications/Utilities/XQuartz.app"))
        );
    }

    #[test]
    fn kind_parses_aliases() {
        assert_eq!(
            "docker".parse::<DependencyKind>().unwrap(),
            DependencyKind::ContainerRuntime
        );
        assert_eq!(
            "Homebrew".parse::<DependencyKind>().unwrap(),
            DependencyKind::PackageManager
        );
        assert_eq!(
            "display-server".parse::<DependencyKind>().unwrap(),
            DependencyKind::DisplayServer
        );
        assert!(matches!(
            "podman".parse::<DependencyKind>(),
            Err(DepsError::UnknownDependency { .. })
        ));
    }

    #[test]
    fn set_iterates_in_fixed_order() {
        let set = ready_set();
        let names: Vec<_> = set.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Homebrew", "Docker", "XQuartz"]);
    }

    #[test]
    fn set_ready_when_all_installed_and_configured() {
        let set = ready_set();
        assert!(set.all_ready());
        assert!(!set.has_missing());
        assert!(set.missing().is_empty());
    }

    #[test]
    fn unconfigured_display_server_counts_as_missing() {
        let mut set = ready_set();
        set.display_server = DependencyStatus::unconfigured(
            DependencyKind::DisplayServer,
            PathBuf::from("/Applications/Utilities/XQuartz.app"),
            "XQuartz is installed but needs configuration",
        );
        assert!(set.has_missing());
        assert_eq!(set.missing().len(), 1);
        assert_eq!(set.missing()[0].kind(), DependencyKind::DisplayServer);
    }

    #[test]
    fn get_returns_matching_status() {
        let set = ready_set();
        for kind in DependencyKind::ALL {
            assert_eq!(set.get(kind).kind(), kind);
        }
    }

    #[test]
    fn json_uses_empty_path_for_missing() {
        let status = DependencyStatus::missing(DependencyKind::PackageManager, "not found");
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["name"], "Homebrew");
        assert_eq!(json["kind"], "package_manager");
        assert_eq!(json["installed"], false);
        assert_eq!(json["path"], "");
        assert_eq!(json["state"], "missing");
    }

    #[test]
    fn json_set_has_three_entries() {
        let json = serde_json::to_value(ready_set()).unwrap();
        assert_eq!(json["container_runtime"]["path"], "/Applications/Docker.app");
        assert_eq!(json["display_server"]["state"], "installed");
    }
}

//! Settings file discovery and loading.

use crate::config::schema::DepsConfig;
use crate::error::{DepsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The current user's home directory, from `HOME`.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Default settings location: `~/sasm-data/dependencies.yml`.
pub fn default_config_path(home: &Path) -> PathBuf {
    home.join("sasm-data").join("dependencies.yml")
}

/// Load settings.
///
/// An explicit path must exist. Without one, the default location under
/// `home` is used when present and built-in defaults otherwise. With no home
/// directory there is no default location and `~/` paths stay as written.
///
/// # Errors
///
/// Returns `ConfigNotFound` if an explicit file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config(explicit: Option<&Path>, home: Option<&Path>) -> Result<DepsConfig> {
    let path = match (explicit, home) {
        (Some(p), _) => p.to_path_buf(),
        (None, None) => {
            tracing::debug!("HOME is not set, using default settings");
            return Ok(DepsConfig::default());
        }
        (None, Some(home)) => {
            let default = default_config_path(home);
            if !default.exists() {
                tracing::debug!("No settings at {}, using defaults", default.display());
                return Ok(DepsConfig::default());
            }
            default
        }
    };

    let content = fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DepsError::ConfigNotFound { path: path.clone() }
        } else {
            DepsError::Io(e)
        }
    })?;

    tracing::debug!("Loading settings from {}", path.display());
    let mut config = parse_config(&content, &path)?;
    if let Some(home) = home {
        expand_home(&mut config, home);
    }
    Ok(config)
}

/// Parse YAML content into `DepsConfig`.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<DepsConfig> {
    if content.trim().is_empty() {
        return Ok(DepsConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| DepsError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Replace a leading `~/` in every configured path.
fn expand_home(config: &mut DepsConfig, home: &Path) {
    let expand = |p: &mut PathBuf| {
        if let Ok(rest) = p.strip_prefix("~") {
            *p = home.join(rest);
        }
    };

    for dir in &mut config.package_manager.extra_search_paths {
        expand(dir);
    }
    expand(&mut config.container_runtime.app_bundle);
    expand(&mut config.container_runtime.fixed_binary);
    expand(&mut config.display_server.app_bundle);
    expand(&mut config.display_server.preference_file);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_default_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(None, Some(temp.path())).unwrap();
        assert_eq!(config.package_manager.binary, "brew");
    }

    #[test]
    fn default_file_is_picked_up() {
        let temp = TempDir::new().unwrap();
        let path = default_config_path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "container_runtime:\n  cask: colima\n").unwrap();

        let config = load_config(None, Some(temp.path())).unwrap();
        assert_eq!(config.container_runtime.cask, "colima");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = load_config(Some(&temp.path().join("nope.yml")), Some(temp.path()));
        assert!(matches!(result, Err(DepsError::ConfigNotFound { .. })));
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yml");
        fs::write(&path, "launch: [unclosed").unwrap();

        let err = load_config(Some(&path), Some(temp.path())).unwrap_err();
        match err {
            DepsError::ConfigParseError { path: p, .. } => assert_eq!(p, path),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("  \n", Path::new("x.yml")).unwrap();
        assert_eq!(config.display_server.cask, "xquartz");
    }

    #[test]
    fn tilde_paths_expand_to_home() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deps.yml");
        fs::write(
            &path,
            "display_server:\n  preference_file: ~/prefs/x11.plist\n  app_bundle: ~/Applications/XQuartz.app\n",
        )
        .unwrap();

        let config = load_config(Some(&path), Some(Path::new("/Users/ada"))).unwrap();
        assert_eq!(
            config.display_server.preference_file,
            PathBuf::from("/Users/ada/prefs/x11.plist")
        );
        assert_eq!(
            config.display_server.app_bundle,
            PathBuf::from("/Users/ada/Applications/XQuartz.app")
        );
    }

    #[test]
    fn no_home_uses_defaults_and_keeps_tilde() {
        let temp = TempDir::new().unwrap();
        let config = load_config(None, None).unwrap();
        assert_eq!(config.package_manager.binary, "brew");

        let path = temp.path().join("deps.yml");
        fs::write(&path, "display_server:\n  preference_file: ~/x11.plist\n").unwrap();
        let config = load_config(Some(&path), None).unwrap();
        assert_eq!(
            config.display_server.preference_file,
            PathBuf::from("~/x11.plist")
        );
    }
}

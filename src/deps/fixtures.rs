//! Shared test fixtures: a config whose fixed paths all live in a temp dir.

use std::fs;
use std::path::Path;

use crate::config::{DepsConfig, PreferenceReaderKind};

/// Config with every fixed path pointing into `root`.
pub fn sandbox_config(root: &Path) -> DepsConfig {
    let mut config = DepsConfig::default();
    config.package_manager.extra_search_paths = vec![];
    config.container_runtime.app_bundle = root.join("Applications/Docker.app");
    config.container_runtime.fixed_binary = root.join("usr/local/bin/docker");
    config.display_server.app_bundle = root.join("Applications/Utilities/XQuartz.app");
    config.display_server.preference_file =
        root.join("Library/Preferences/org.macosforge.xquartz.X11.plist");
    config.display_server.preference_reader = PreferenceReaderKind::File;
    config
}

/// Create a fake binary at a path (creates parent dirs as needed).
pub fn create_fake_binary(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "#!/bin/sh\n").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}

//! Settings for dependency probing, installation and hand-off.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use sasm_deps::config::load_config;
//! use tempfile::TempDir;
//!
//! let home = TempDir::new().unwrap();
//! let config = load_config(None, Some(home.path())).unwrap();
//! assert_eq!(config.package_manager.binary, "brew");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{default_config_path, home_dir, load_config, parse_config};
pub use schema::{
    preference_file_in, ContainerRuntimeConfig, DepsConfig, DisplayServerConfig, LaunchConfig,
    PackageManagerConfig, PreferenceReaderKind,
};

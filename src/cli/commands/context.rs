//! What every command needs to probe and install.

use std::path::PathBuf;

use crate::config::DepsConfig;
use crate::deps::probe::default_search_path;
use crate::deps::{DependencySet, HostContext, Installer, Prober};
use crate::shell::is_elevated;

/// Settings, the program runner and the search path used for one run.
pub struct SetupContext<'a> {
    pub config: &'a DepsConfig,
    pub host: &'a HostContext<'a>,
    pub search_path: Vec<PathBuf>,
    /// Running as root; Homebrew's installer refuses to.
    pub elevated: bool,
}

impl<'a> SetupContext<'a> {
    /// Context searching the process PATH plus the configured prefixes.
    pub fn new(config: &'a DepsConfig, host: &'a HostContext<'a>) -> Self {
        Self {
            config,
            host,
            search_path: default_search_path(config),
            elevated: is_elevated(),
        }
    }

    pub fn with_search_path(
        config: &'a DepsConfig,
        host: &'a HostContext<'a>,
        search_path: Vec<PathBuf>,
    ) -> Self {
        Self {
            config,
            host,
            search_path,
            elevated: is_elevated(),
        }
    }

    pub fn prober(&self) -> Prober<'a> {
        Prober::with_search_path(self.config, self.host, self.search_path.clone())
    }

    pub fn installer(&self) -> Installer<'a> {
        Installer::with_search_path(self.config, self.host, self.search_path.clone())
    }

    /// A fresh snapshot.
    pub fn probe(&self) -> DependencySet {
        self.prober().probe_all()
    }
}

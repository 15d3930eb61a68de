//! Dependencies handed to every operation.

use crate::config::Configuration;
use crate::git::VersionControl;
use crate::layout::Layout;
use crate::registry::ExternalRepoRegistry;

/// Configuration plus the version-control backend, built once per invocation.
pub struct AppContext<'a> {
    pub config: &'a Configuration,
    pub vcs: &'a dyn VersionControl,
}

impl<'a> AppContext<'a> {
    pub fn new(config: &'a Configuration, vcs: &'a dyn VersionControl) -> Self {
        AppContext { config, vcs }
    }

    pub fn layout(&self) -> Layout {
        self.config.layout()
    }

    pub fn registry(&self) -> ExternalRepoRegistry {
        ExternalRepoRegistry::new(self.layout().config_file())
    }
}

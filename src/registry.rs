//! Registry of pulled external repositories, persisted in `config.yaml`.
//!
//! ```yaml
//! repositories:
//!   external:
//!     - https://github.com/faderskd/common-commands
//! ```
//!
//! `pull --update-all` re-syncs every URL recorded here.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub repositories: RepositoriesSection,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct RepositoriesSection {
    /// URLs of external repositories, deduplicated on every write.
    #[serde(default)]
    pub external: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ExternalRepoRegistry {
    path: PathBuf,
}

impl ExternalRepoRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ExternalRepoRegistry { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config; a missing or empty file yields the initial document.
    pub fn load(&self) -> Result<RepositoryConfig> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(RepositoryConfig::default()),
            Err(e) => return Err(Error::io(&self.path)(e)),
        };
        if data.trim().is_empty() {
            return Ok(RepositoryConfig::default());
        }
        serde_yaml::from_str(&data).map_err(|source| Error::CorruptConfig {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, cfg: &RepositoryConfig) -> Result<()> {
        let data = serde_yaml::to_string(cfg).map_err(|source| Error::CorruptConfig {
            path: self.path.clone(),
            source,
        })?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(Error::io(parent))?;
        }
        fs::write(&self.path, data).map_err(Error::io(&self.path))?;
        log::debug!("saved repository config to {}", self.path.display());
        Ok(())
    }

    /// Add `url` to the known external repositories. Last writer wins.
    pub fn record_external_repo(&self, url: &str) -> Result<()> {
        let mut cfg = self.load()?;
        let mut known: BTreeSet<String> = cfg.repositories.external.drain(..).collect();
        known.insert(url.to_string());
        cfg.repositories.external = known.into_iter().collect();
        self.save(&cfg)
    }

    pub fn external_repos(&self) -> Result<Vec<String>> {
        Ok(self.load()?.repositories.external)
    }
}

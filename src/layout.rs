//! On-disk layout of the command store.
//!
//! ```text
//! <base>/repositories/
//!   main/
//!     commands.json
//!     config.yaml
//!     fish/<name>.fish
//!     fish/h.fish
//!   external/
//!     <owner>_<name>/
//!       commands.json
//!       fish/<name>.fish
//! ```
//!
//! Every path is derived from the base directory; nothing here touches the filesystem
//! except [`Layout::repository_directories`].

use crate::constants::{
    COMMANDS_FILE_NAME, CONFIG_FILE_NAME, EXTERNAL_REPOSITORIES_DIR_NAME,
    FISH_FUNCTIONS_DIR_NAME, FISH_FUNCTION_EXTENSION, MAIN_REPOSITORY_DIR_NAME,
    REPOSITORIES_DIR_NAME,
};
use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    base_dir: PathBuf,
}

impl Layout {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Layout {
            base_dir: base_dir.into(),
        }
    }

    pub fn repositories_dir(&self) -> PathBuf {
        self.base_dir.join(REPOSITORIES_DIR_NAME)
    }

    pub fn main_repository_dir(&self) -> PathBuf {
        self.repositories_dir().join(MAIN_REPOSITORY_DIR_NAME)
    }

    pub fn main_index_file(&self) -> PathBuf {
        Self::index_file(&self.main_repository_dir())
    }

    pub fn main_functions_dir(&self) -> PathBuf {
        Self::functions_dir(&self.main_repository_dir())
    }

    /// The persisted registry of pulled external repositories lives in the main repository.
    pub fn config_file(&self) -> PathBuf {
        self.main_repository_dir().join(CONFIG_FILE_NAME)
    }

    pub fn external_repositories_dir(&self) -> PathBuf {
        self.repositories_dir().join(EXTERNAL_REPOSITORIES_DIR_NAME)
    }

    /// `normalized_name` is the `owner_name` form produced by
    /// [`RepositoryUrl::directory_name`](crate::git::RepositoryUrl::directory_name).
    pub fn external_repository_dir(&self, normalized_name: &str) -> PathBuf {
        self.external_repositories_dir().join(normalized_name)
    }

    pub fn index_file(repo_dir: &Path) -> PathBuf {
        repo_dir.join(COMMANDS_FILE_NAME)
    }

    pub fn functions_dir(repo_dir: &Path) -> PathBuf {
        repo_dir.join(FISH_FUNCTIONS_DIR_NAME)
    }

    pub fn function_file(repo_dir: &Path, name: &str) -> PathBuf {
        Self::functions_dir(repo_dir).join(format!("{name}.{FISH_FUNCTION_EXTENSION}"))
    }

    /// List every repository taking part in listing and searching.
    ///
    /// The main repository always comes first, followed by each directory under
    /// `external/` sorted by name. Plain files under `external/` are skipped and a
    /// missing `external/` directory yields only the main repository.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if `external/` exists but cannot be read.
    pub fn repository_directories(&self) -> Result<Vec<PathBuf>> {
        let mut results = vec![self.main_repository_dir()];
        let external = self.external_repositories_dir();
        let rd = match fs::read_dir(&external) {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(results),
            Err(e) => return Err(Error::io(&external)(e)),
        };

        let mut dirs = Vec::new();
        for ent in rd {
            let ent = ent.map_err(Error::io(&external))?;
            let path = ent.path();
            if path.is_dir() {
                dirs.push(path);
            } else {
                log::warn!("skipping non-directory entry {}", path.display());
            }
        }
        dirs.sort();
        results.extend(dirs);
        Ok(results)
    }
}

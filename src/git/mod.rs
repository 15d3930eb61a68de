//! Git integration layer.
//!
//! Operations only ever need four things from version control: attach a remote to a
//! fresh directory, fast-forward it, push local changes and tell whether a directory
//! is a working tree. These are captured by the [`VersionControl`] trait so the
//! processors can be exercised without a real remote; [`GitCli`] is the production
//! implementation driving the `git` executable.

mod cli_backend;
mod url;

use crate::error::Result;
use std::path::{Path, PathBuf};

pub use cli_backend::GitCli;
pub use url::{parse_repository_url, RepositoryUrl};

pub trait VersionControl {
    /// Initialize a repository in `dir` and register `url` as `origin`.
    fn init_and_attach_remote(&self, dir: &Path, url: &str) -> Result<()>;

    /// Pull the primary branch from `origin` and switch the working tree to it.
    fn pull_latest(&self, dir: &Path) -> Result<()>;

    /// Commit `paths` on the primary branch and push it to `origin`.
    fn push_local(&self, dir: &Path, paths: &[PathBuf]) -> Result<()>;

    fn is_under_version_control(&self, dir: &Path) -> bool {
        dir.join(".git").exists()
    }
}

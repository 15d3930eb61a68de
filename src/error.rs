//! Error taxonomy for every operation of the command store.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or contradictory input, or an unmet environment precondition.
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Invalid git repository url: '{0}'")]
    InvalidRepositoryUrl(String),
    #[error("Command {0} does not exist.")]
    NotFound(String),
    #[error("Command index {} is not valid JSON: {source}", path.display())]
    CorruptIndex {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Repository config {} is not valid YAML: {source}", path.display())]
    CorruptConfig {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("'{command}' failed in {}: {detail}", dir.display())]
    GitCommandFailed {
        command: String,
        dir: PathBuf,
        detail: String,
    },
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static URL_WITH_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?|git|ssh|git\+ssh)://(?:[^@/\s]+@)?[A-Za-z0-9.-]+(?::\d+)?/(?P<path>[^\s]+)$")
        .expect("valid regex")
});
static FILE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^file://(?P<path>/[^\s]+)$").expect("valid regex"));
static SCP_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+@[A-Za-z0-9.-]+:(?P<path>[^/\s][^\s]*)$").expect("valid regex")
});
static SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid regex"));

/// Owner and name of a remote command repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryUrl {
    pub owner: String,
    pub name: String,
}

impl RepositoryUrl {
    /// Directory name under `external/`, e.g. `faderskd_common_commands`.
    pub fn directory_name(&self) -> String {
        format!("{}_{}", self.owner, self.name).replace('-', "_")
    }
}

/// Validate a git remote URL and extract its owner and name.
///
/// Accepted forms:
/// - `https://host/owner/name[.git]` (also `http`, `git`, `ssh`, `git+ssh`)
/// - `user@host:owner/name[.git]`
/// - `file:///path/to/owner/name[.git]`
///
/// # Errors
/// Returns [`Error::InvalidRepositoryUrl`] for anything else.
pub fn parse_repository_url(url: &str) -> Result<RepositoryUrl> {
    let invalid = || Error::InvalidRepositoryUrl(url.to_string());
    let url = url.trim();
    let caps = URL_WITH_SCHEME
        .captures(url)
        .or_else(|| FILE_URL.captures(url))
        .or_else(|| SCP_LIKE.captures(url))
        .ok_or_else(invalid)?;

    let path = caps.name("path").map_or("", |m| m.as_str());
    let segments: Vec<&str> = path
        .trim_end_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    let (owner, name) = match segments.as_slice() {
        [.., owner, name] => (*owner, name.strip_suffix(".git").unwrap_or(*name)),
        _ => return Err(invalid()),
    };
    if name.is_empty() || !SEGMENT.is_match(owner) || !SEGMENT.is_match(name) {
        return Err(invalid());
    }

    Ok(RepositoryUrl {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

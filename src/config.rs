//! Runtime configuration for command-reminder
//!
//! All environment lookups happen here, once, when the binary starts. The resulting
//! [`Configuration`] is passed by reference to every operation; nothing else in the
//! crate reads the process environment.
//!
//! ## Environment
//!
//! - `COMMAND_REMINDER_DIR` - base directory holding all repositories
//!   (default: `$HOME/.command-reminder`)
//! - `HOME` - required; used for the default base directory and the history file
//! - `XDG_DATA_HOME` - where fish keeps its history (default: `$HOME/.local/share`)
//!
//! ## Placeholder Expansion
//!
//! `COMMAND_REMINDER_DIR` supports a leading `~` and the following placeholders:
//! - `${VAR}` - Simple substitution
//! - `${VAR:-default}` - Use default if VAR is unset or empty
//! - `${VAR-default}` - Use default if VAR is unset
//! - `${VAR:+alt}` - Use alt if VAR is set and non-empty
//! - `${VAR+alt}` - Use alt if VAR is set

use crate::constants::{
    COMMAND_REMINDER_DIR_ENV, DEFAULT_BASE_DIR_NAME, FISH_HISTORY_RELATIVE_PATH,
};
use crate::error::{Error, Result};
use crate::layout::Layout;
use regex::Regex;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?:(:?[-+])([^}]*))?\}").expect("valid regex")
});

/// Resolved settings shared by every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Root of the on-disk layout; see [`Layout`].
    pub base_dir: PathBuf,
    /// Fish history file that `load` appends to.
    pub history_file: PathBuf,
}

impl Configuration {
    pub fn new(base_dir: impl Into<PathBuf>, history_file: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        if base_dir.as_os_str().is_empty() {
            return Err(Error::InvalidArgument(
                "Base directory must not be empty".to_string(),
            ));
        }
        Ok(Configuration {
            base_dir,
            history_file: history_file.into(),
        })
    }

    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if no home directory can be determined or the
    /// base directory expands to an empty path.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let home = lookup("HOME")
            .filter(|h| !h.trim().is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                Error::InvalidArgument("$HOME environment variable must be set".to_string())
            })?;

        let base_dir = match lookup(COMMAND_REMINDER_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            Some(raw) => expand_home(&expand_env_placeholders(&raw, &lookup), &home),
            None => home.join(DEFAULT_BASE_DIR_NAME),
        };

        let data_dir = lookup("XDG_DATA_HOME")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".local").join("share"));

        Self::new(base_dir, data_dir.join(FISH_HISTORY_RELATIVE_PATH))
    }

    pub fn layout(&self) -> Layout {
        Layout::new(&self.base_dir)
    }
}

/// Replace a leading `~` with the home directory.
fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        home.to_path_buf()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(raw)
    }
}

pub fn expand_env_placeholders(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    PLACEHOLDER
        .replace_all(input, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            let op = caps.get(2).map_or("", |m| m.as_str());
            let val = caps.get(3).map_or("", |m| m.as_str());
            let var = lookup(var_name);

            match (var.as_deref(), op) {
                (Some(v), "") => v.to_string(),                    // ${VAR}
                (Some(v), ":-") if !v.is_empty() => v.to_string(), // ${VAR:-default}
                (_, ":-") => val.to_string(),
                (Some(v), "-") => v.to_string(), // ${VAR-default}
                (None, "-") => val.to_string(),
                (Some(v), ":+") if !v.is_empty() => val.to_string(), // ${VAR:+alt}
                (Some(_), "+") => val.to_string(),                   // ${VAR+alt}
                _ => String::new(),
            }
        })
        .to_string()
}

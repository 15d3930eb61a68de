//! Fish history import.
//!
//! `list` prints `name: command` lines; piping those into `load` appends each command
//! to the fish history file so it can be recalled with the usual history search.

use crate::error::{Error, Result};
use regex::Regex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

static COMMAND_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w+-]+: (.+)$").expect("valid regex"));

/// Extract the command part of every `name: command` line.
///
/// Blank lines and lines without the `name: ` prefix are skipped.
pub fn parse_command_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty())
        .filter_map(|l| COMMAND_LINE.captures(l))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Append one history entry per command, all stamped with `timestamp` (unix seconds).
///
/// The file and its parent directory are created when missing.
pub fn append_history_entries(history_file: &Path, commands: &[String], timestamp: i64) -> Result<()> {
    if commands.is_empty() {
        return Ok(());
    }
    if let Some(parent) = history_file.parent() {
        fs::create_dir_all(parent).map_err(Error::io(parent))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(history_file)
        .map_err(Error::io(history_file))?;

    let mut entries = String::new();
    for c in commands {
        entries.push_str(&format!("- cmd: {c}\n  when: {timestamp}\n"));
    }
    file.write_all(entries.as_bytes())
        .map_err(Error::io(history_file))?;
    log::debug!(
        "appended {} entries to {}",
        commands.len(),
        history_file.display()
    );
    Ok(())
}

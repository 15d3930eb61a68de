//! The per-repository command index (`commands.json`).
//!
//! The file is a single JSON object mapping a command name to a two element array of
//! command text and tags:
//!
//! ```json
//! {"mongo_login": ["mongo --user a", ["#mongo", "#onduty"]]}
//! ```
//!
//! Every mutation reads the whole file, changes the map in memory and rewrites the
//! whole file through the same handle. There is no locking: two concurrent writers
//! race and the last one wins.

use crate::error::{Error, Result};
use crate::layout::Layout;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Command text and tag set of one recorded command.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry(pub String, pub BTreeSet<String>);

impl CommandEntry {
    pub fn command(&self) -> &str {
        &self.0
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.1
    }
}

/// One search hit, as printed by `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundCommand {
    pub name: String,
    pub command: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandIndex {
    pub commands: BTreeMap<String, CommandEntry>,
}

impl CommandIndex {
    /// Load the index of `repo_dir`. A missing or empty file is an empty index.
    ///
    /// # Errors
    /// - [`Error::CorruptIndex`] if the file is not a valid index
    /// - [`Error::Io`] if it cannot be read
    pub fn load(repo_dir: &Path) -> Result<Self> {
        let path = Layout::index_file(repo_dir);
        let mut file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::io(&path)(e)),
        };
        read_index(&mut file, &path)
    }

    /// Insert or overwrite `name`, normalizing `tags` first.
    pub fn upsert(repo_dir: &Path, name: &str, command: &str, tags: &[String]) -> Result<()> {
        rewrite(repo_dir, true, |index| {
            index.commands.insert(
                name.to_string(),
                CommandEntry(command.to_string(), normalize_tags(tags)),
            );
            Ok(())
        })
    }

    /// Delete `name` from the index.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the index file does not exist or lacks `name`;
    /// the file is left untouched in that case.
    pub fn remove(repo_dir: &Path, name: &str) -> Result<()> {
        if !Layout::index_file(repo_dir).is_file() {
            return Err(Error::NotFound(name.to_string()));
        }
        rewrite(repo_dir, false, |index| {
            index
                .commands
                .remove(name)
                .map(|_| ())
                .ok_or_else(|| Error::NotFound(name.to_string()))
        })
    }

    /// Commands whose tags contain every tag in `required`; an empty filter matches all.
    pub fn search_by_tags(&self, required: &[String]) -> Vec<FoundCommand> {
        let required: BTreeSet<&str> = required.iter().map(String::as_str).collect();
        self.commands
            .iter()
            .filter(|(_, entry)| required.iter().all(|t| entry.tags().contains(*t)))
            .map(|(name, entry)| FoundCommand {
                name: name.clone(),
                command: entry.command().to_string(),
            })
            .collect()
    }

    pub fn tags(&self) -> BTreeSet<String> {
        self.commands
            .values()
            .flat_map(|entry| entry.tags().iter().cloned())
            .collect()
    }
}

/// Trim every tag, drop empty ones and deduplicate.
pub fn normalize_tags(tags: &[String]) -> BTreeSet<String> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_index(file: &mut File, path: &Path) -> Result<CommandIndex> {
    let mut data = String::new();
    file.read_to_string(&mut data).map_err(Error::io(path))?;
    if data.trim().is_empty() {
        return Ok(CommandIndex::default());
    }
    let commands = serde_json::from_str(&data).map_err(|source| Error::CorruptIndex {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(CommandIndex { commands })
}

/// Read-modify-write of the index through one handle.
///
/// Nothing is written when `modify` fails.
fn rewrite(
    repo_dir: &Path,
    create: bool,
    modify: impl FnOnce(&mut CommandIndex) -> Result<()>,
) -> Result<()> {
    let path: PathBuf = Layout::index_file(repo_dir);
    let mut file = match OpenOptions::new()
        .read(true)
        .write(true)
        .create(create)
        .truncate(false)
        .open(&path)
    {
        Ok(f) => f,
        Err(e) => return Err(Error::io(&path)(e)),
    };

    let mut index = read_index(&mut file, &path)?;
    modify(&mut index)?;

    let data = serde_json::to_string(&index.commands).map_err(|source| Error::CorruptIndex {
        path: path.clone(),
        source,
    })?;
    file.seek(SeekFrom::Start(0)).map_err(Error::io(&path))?;
    file.set_len(0).map_err(Error::io(&path))?;
    file.write_all(data.as_bytes()).map_err(Error::io(&path))?;
    log::debug!("rewrote {} ({} commands)", path.display(), index.commands.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_and_empty_index_load_as_empty() {
        let dir = TempDir::new().unwrap();
        assert!(CommandIndex::load(dir.path()).unwrap().commands.is_empty());

        fs::write(Layout::index_file(dir.path()), "").unwrap();
        assert!(CommandIndex::load(dir.path()).unwrap().commands.is_empty());
    }

    #[test]
    fn test_malformed_index_is_corrupt() {
        let dir = TempDir::new().unwrap();
        fs::write(Layout::index_file(dir.path()), "{not json").unwrap();
        let err = CommandIndex::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::CorruptIndex { .. }));
    }

    #[test]
    fn test_upsert_normalizes_tags() {
        let dir = TempDir::new().unwrap();
        CommandIndex::upsert(
            dir.path(),
            "deploy",
            "make deploy",
            &tags(&[" #ops ", "", "#ci", "#ops", "   "]),
        )
        .unwrap();

        let index = CommandIndex::load(dir.path()).unwrap();
        let entry = &index.commands["deploy"];
        assert_eq!(entry.command(), "make deploy");
        assert_eq!(
            entry.tags().iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["#ci", "#ops"]
        );
    }

    #[test]
    fn test_upsert_overwrites_existing_name() {
        let dir = TempDir::new().unwrap();
        CommandIndex::upsert(dir.path(), "ls", "ls -la", &tags(&["#a"])).unwrap();
        CommandIndex::upsert(dir.path(), "ls", "ls -lah", &tags(&["#b"])).unwrap();

        let index = CommandIndex::load(dir.path()).unwrap();
        assert_eq!(index.commands.len(), 1);
        assert_eq!(index.commands["ls"].command(), "ls -lah");
        assert!(index.commands["ls"].tags().contains("#b"));
    }

    #[test]
    fn test_shorter_rewrite_truncates_previous_content() {
        let dir = TempDir::new().unwrap();
        CommandIndex::upsert(dir.path(), "long", &"x".repeat(200), &[]).unwrap();
        CommandIndex::remove(dir.path(), "long").unwrap();
        let raw = fs::read_to_string(Layout::index_file(dir.path())).unwrap();
        assert_eq!(raw, "{}");
    }

    #[test]
    fn test_on_disk_format_is_name_to_pair() {
        let dir = TempDir::new().unwrap();
        CommandIndex::upsert(dir.path(), "a", "echo a", &tags(&["#t"])).unwrap();
        let raw = fs::read_to_string(Layout::index_file(dir.path())).unwrap();
        assert_eq!(raw, r##"{"a":["echo a",["#t"]]}"##);
    }

    #[test]
    fn test_remove_missing_name_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        fs::write(Layout::index_file(dir.path()), r#"{ "a": ["echo a", []] }"#).unwrap();
        let err = CommandIndex::remove(dir.path(), "b").unwrap_err();
        assert!(matches!(err, Error::NotFound(ref n) if n == "b"));
        assert_eq!(
            fs::read_to_string(Layout::index_file(dir.path())).unwrap(),
            r#"{ "a": ["echo a", []] }"#
        );
    }

    #[test]
    fn test_remove_without_index_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = CommandIndex::remove(dir.path(), "a").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(!Layout::index_file(dir.path()).exists());
    }

    #[test]
    fn test_search_is_subset_match() {
        let dir = TempDir::new().unwrap();
        CommandIndex::upsert(dir.path(), "a", "echo a", &tags(&["#x", "#y"])).unwrap();
        CommandIndex::upsert(dir.path(), "b", "echo b", &tags(&["#y"])).unwrap();
        CommandIndex::upsert(dir.path(), "c", "echo c", &[]).unwrap();
        let index = CommandIndex::load(dir.path()).unwrap();

        let names = |filter: &[&str]| -> Vec<String> {
            index
                .search_by_tags(&tags(filter))
                .into_iter()
                .map(|f| f.name)
                .collect()
        };
        assert_eq!(names(&[]), vec!["a", "b", "c"]);
        assert_eq!(names(&["#y"]), vec!["a", "b"]);
        assert_eq!(names(&["#y", "#x"]), vec!["a"]);
        assert_eq!(names(&["#x", "#x"]), vec!["a"]);
        assert!(names(&["#z"]).is_empty());
        assert!(names(&["#x", "#z"]).is_empty());
    }

    #[test]
    fn test_tags_is_union() {
        let dir = TempDir::new().unwrap();
        CommandIndex::upsert(dir.path(), "a", "echo a", &tags(&["#x", "#y"])).unwrap();
        CommandIndex::upsert(dir.path(), "b", "echo b", &tags(&["#y", "#z"])).unwrap();
        let index = CommandIndex::load(dir.path()).unwrap();
        assert_eq!(
            index.tags().into_iter().collect::<Vec<_>>(),
            vec!["#x", "#y", "#z"]
        );
    }

    #[test]
    fn test_interleaved_writers_lose_an_update() {
        // No locking: a writer that saved a stale snapshot silently drops the other's record.
        let dir = TempDir::new().unwrap();
        CommandIndex::upsert(dir.path(), "base", "echo base", &[]).unwrap();
        let stale = fs::read_to_string(Layout::index_file(dir.path())).unwrap();

        CommandIndex::upsert(dir.path(), "first", "echo first", &[]).unwrap();
        // second writer finishes last with its own, older view of the file
        fs::write(Layout::index_file(dir.path()), &stale).unwrap();
        CommandIndex::upsert(dir.path(), "second", "echo second", &[]).unwrap();

        let index = CommandIndex::load(dir.path()).unwrap();
        assert!(index.commands.contains_key("second"));
        assert!(!index.commands.contains_key("first"));
    }
}

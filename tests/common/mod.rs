#![allow(dead_code)]

use command_reminder::commands::{dispatch, Operation};
use command_reminder::config::Configuration;
use command_reminder::context::AppContext;
use command_reminder::error::{Error, Result};
use command_reminder::git::VersionControl;
use command_reminder::layout::Layout;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated base directory and history file for one test.
pub struct Sandbox {
    pub dir: TempDir,
    pub config: Configuration,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = Configuration::new(
            dir.path().join("store"),
            dir.path().join("share").join("fish").join("fish_history"),
        )
        .unwrap();
        Sandbox { dir, config }
    }

    pub fn layout(&self) -> Layout {
        self.config.layout()
    }

    /// Dispatch `op` with `vcs` and return what it printed.
    pub fn run_with(&self, vcs: &dyn VersionControl, op: Operation) -> Result<String> {
        let ctx = AppContext::new(&self.config, vcs);
        let mut out = Vec::new();
        dispatch(&ctx, op, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    pub fn run(&self, op: Operation) -> Result<String> {
        self.run_with(&RecordingVcs::default(), op)
    }
}

/// Fake remote recording each git step.
///
/// `init_and_attach_remote` creates a `.git` directory; `pull_latest` writes
/// `remote_commands` (name, command) into the pulled directory, like a clone of a
/// repository holding those commands would.
#[derive(Default)]
pub struct RecordingVcs {
    pub calls: RefCell<Vec<String>>,
    pub remote_commands: Vec<(String, String)>,
    pub fail_pull: bool,
}

impl RecordingVcs {
    pub fn with_remote_commands(commands: &[(&str, &str)]) -> Self {
        RecordingVcs {
            remote_commands: commands
                .iter()
                .map(|(n, c)| (n.to_string(), c.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl VersionControl for RecordingVcs {
    fn init_and_attach_remote(&self, dir: &Path, url: &str) -> Result<()> {
        fs::create_dir_all(dir.join(".git")).unwrap();
        self.record(format!("init {} {url}", dir.display()));
        Ok(())
    }

    fn pull_latest(&self, dir: &Path) -> Result<()> {
        self.record(format!("pull {}", dir.display()));
        if self.fail_pull {
            return Err(Error::GitCommandFailed {
                command: "git pull origin main".into(),
                dir: dir.to_path_buf(),
                detail: "exit status: 1".into(),
            });
        }
        if !self.remote_commands.is_empty() {
            let index: serde_json::Map<String, serde_json::Value> = self
                .remote_commands
                .iter()
                .map(|(n, c)| (n.clone(), serde_json::json!([c, ["#shared"]])))
                .collect();
            fs::write(Layout::index_file(dir), serde_json::to_string(&index).unwrap()).unwrap();
            fs::create_dir_all(Layout::functions_dir(dir)).unwrap();
            for (n, c) in &self.remote_commands {
                fs::write(Layout::function_file(dir, n), c).unwrap();
            }
        }
        Ok(())
    }

    fn push_local(&self, dir: &Path, paths: &[PathBuf]) -> Result<()> {
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        self.record(format!("push {} {}", dir.display(), names.join(",")));
        Ok(())
    }
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

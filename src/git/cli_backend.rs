use super::VersionControl;
use crate::constants::{COMMIT_MESSAGE, PRIMARY_BRANCH, REMOTE_NAME};
use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Runs `git` as a blocking subprocess inside the target directory.
///
/// Every step must exit successfully (the staged-changes check reads the exit code
/// instead); the first failure aborts the whole operation and leaves the directory in
/// whatever state git left it. There is no retry and no timeout.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        GitCli {
            program: PathBuf::from("git"),
        }
    }
}

impl GitCli {
    /// Use a specific git executable instead of the one on `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        GitCli {
            program: program.into(),
        }
    }

    /// Spawn git and wait for it; returns the printable command line and its output.
    fn exec<I, S>(&self, dir: &Path, args: I) -> Result<(String, Output)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let display = std::iter::once(self.program.as_os_str())
            .chain(args.iter().map(|a| -> &OsStr { a.as_ref() }))
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        log::debug!("running `{}` in {}", display, dir.display());

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::GitCommandFailed {
                command: display.clone(),
                dir: dir.to_path_buf(),
                detail: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            log::debug!("{}", stdout.trim_end());
        }
        Ok((display, output))
    }

    fn run<I, S>(&self, dir: &Path, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let (display, output) = self.exec(dir, args)?;
        if !output.status.success() {
            return Err(failure(display, dir, &output));
        }
        Ok(())
    }

    /// Whether the index holds changes not yet committed.
    ///
    /// `git diff --cached --quiet` exits 1 when there are staged changes.
    fn has_staged_changes(&self, dir: &Path) -> Result<bool> {
        let (display, output) = self.exec(dir, ["diff", "--cached", "--quiet"])?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(failure(display, dir, &output)),
        }
    }
}

fn failure(command: String, dir: &Path, output: &Output) -> Error {
    let stderr = String::from_utf8_lossy(&output.stderr);
    Error::GitCommandFailed {
        command,
        dir: dir.to_path_buf(),
        detail: format!("{} {}", output.status, stderr.trim()).trim().to_string(),
    }
}

impl VersionControl for GitCli {
    fn init_and_attach_remote(&self, dir: &Path, url: &str) -> Result<()> {
        self.run(dir, ["init"])?;
        self.run(dir, ["remote", "add", REMOTE_NAME, url])
    }

    fn pull_latest(&self, dir: &Path) -> Result<()> {
        self.run(dir, ["pull", REMOTE_NAME, PRIMARY_BRANCH])?;
        self.run(dir, ["checkout", PRIMARY_BRANCH])
    }

    fn push_local(&self, dir: &Path, paths: &[PathBuf]) -> Result<()> {
        self.run(dir, ["checkout", PRIMARY_BRANCH])?;
        let mut add: Vec<&OsStr> = vec![OsStr::new("add"), OsStr::new("--")];
        add.extend(paths.iter().map(|p| p.as_os_str()));
        self.run(dir, add)?;
        // commits left behind by an earlier failed push still go out
        if self.has_staged_changes(dir)? {
            self.run(dir, ["commit", "-m", COMMIT_MESSAGE])?;
        } else {
            log::info!("nothing to commit in {}", dir.display());
        }
        self.run(dir, ["push", REMOTE_NAME, PRIMARY_BRANCH])
    }
}

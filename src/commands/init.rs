use crate::constants::FISH_FUNCTIONS_PATH_ENV;
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::functions::ensure_history_alias_file;
use crate::git::parse_repository_url;
use crate::layout::Layout;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitRequest {
    /// Remote to mirror the main repository with; `None` keeps it local only.
    pub repo_url: Option<String>,
}

/// Scaffold the main repository and print the fish snippet that puts every
/// functions directory on `fish_function_path`.
///
/// The URL is validated before anything touches the disk. When a URL is given the
/// main repository is attached to it and pulled before the empty index and config
/// are created, so files coming from the remote win.
pub fn run(ctx: &AppContext<'_>, req: InitRequest, out: &mut dyn Write) -> Result<()> {
    let layout = ctx.layout();
    if let Some(url) = &req.repo_url {
        parse_repository_url(url)?;
    }

    let main_dir = layout.main_repository_dir();
    let functions_dir = layout.main_functions_dir();
    fs::create_dir_all(&functions_dir).map_err(Error::io(&functions_dir))?;

    if let Some(url) = &req.repo_url {
        if ctx.vcs.is_under_version_control(&main_dir) {
            log::info!("{} is already a git repository", main_dir.display());
        } else {
            ctx.vcs.init_and_attach_remote(&main_dir, url)?;
        }
        ctx.vcs.pull_latest(&main_dir)?;
    }

    create_empty_file(&layout.main_index_file())?;
    create_empty_file(&layout.config_file())?;
    ensure_history_alias_file(&functions_dir)?;

    writeln!(out, "{}", init_script(&layout)?)?;
    Ok(())
}

fn create_empty_file(path: &Path) -> Result<()> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map(|_| ())
        .map_err(Error::io(path))
}

fn init_script(layout: &Layout) -> Result<String> {
    let mut dirs = vec![layout.main_functions_dir()];
    for repo_dir in layout.repository_directories()?.into_iter().skip(1) {
        let functions_dir = Layout::functions_dir(&repo_dir);
        if functions_dir.is_dir() {
            dirs.push(functions_dir);
        }
    }
    let mut script = format!("set -gx {FISH_FUNCTIONS_PATH_ENV} ${FISH_FUNCTIONS_PATH_ENV}");
    for d in dirs {
        script.push(' ');
        script.push_str(&d.to_string_lossy());
    }
    Ok(script)
}

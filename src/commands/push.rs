use crate::context::AppContext;
use crate::error::{Error, Result};

/// Sync the main repository with its remote: pull first, then commit and push.
pub fn run(ctx: &AppContext<'_>) -> Result<()> {
    let layout = ctx.layout();
    let main_dir = layout.main_repository_dir();
    if !ctx.vcs.is_under_version_control(&main_dir) {
        return Err(Error::InvalidArgument(format!(
            "Main directory: {} is not a git repo",
            main_dir.display()
        )));
    }

    ctx.vcs.pull_latest(&main_dir)?;
    ctx.vcs.push_local(
        &main_dir,
        &[
            layout.main_index_file(),
            layout.main_functions_dir(),
            layout.config_file(),
        ],
    )
}

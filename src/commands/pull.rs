use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::git::parse_repository_url;
use std::fs;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequest {
    pub repo_url: Option<String>,
    pub refresh_all: bool,
}

/// Mirror an external command repository, or refresh every registered one.
///
/// Exactly one of `repo_url` and `refresh_all` must be set; this is checked before
/// anything touches the disk.
pub fn run(ctx: &AppContext<'_>, req: PullRequest) -> Result<()> {
    match (req.repo_url, req.refresh_all) {
        (Some(_), true) => Err(Error::InvalidArgument(
            "Use only one option --update-all or --repo while pulling external repositories."
                .into(),
        )),
        (None, false) => Err(Error::InvalidArgument(
            "Either --repo or --update-all must be given while pulling external repositories."
                .into(),
        )),
        (Some(url), false) => {
            pull_repository(ctx, &url)?;
            ctx.registry().record_external_repo(&url)
        }
        (None, true) => refresh_all(ctx),
    }
}

fn pull_repository(ctx: &AppContext<'_>, url: &str) -> Result<()> {
    let parsed = parse_repository_url(url)?;
    let target = ctx.layout().external_repository_dir(&parsed.directory_name());
    fs::create_dir_all(&target).map_err(Error::io(&target))?;

    if ctx.vcs.is_under_version_control(&target) {
        log::info!("{} already mirrors a remote, pulling", target.display());
    } else {
        ctx.vcs.init_and_attach_remote(&target, url)?;
    }
    ctx.vcs.pull_latest(&target)
}

fn refresh_all(ctx: &AppContext<'_>) -> Result<()> {
    for url in ctx.registry().external_repos()? {
        let parsed = parse_repository_url(&url)?;
        let target = ctx.layout().external_repository_dir(&parsed.directory_name());
        if target.exists() {
            log::debug!("refreshing {url}");
            ctx.vcs.pull_latest(&target)?;
        } else {
            log::info!("{} is missing, pulling {url} again", target.display());
            pull_repository(ctx, &url)?;
        }
    }
    Ok(())
}

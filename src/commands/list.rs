use crate::context::AppContext;
use crate::error::Result;
use crate::index::{CommandIndex, FoundCommand};
use crate::layout::Layout;
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    /// Every tag must be present on a command for it to be listed.
    pub tags: Vec<String>,
    pub pretty: bool,
}

/// Search the main repository and every external one, printing `name: command`.
pub fn run(ctx: &AppContext<'_>, req: ListRequest, out: &mut dyn Write) -> Result<()> {
    let mut results: Vec<FoundCommand> = Vec::new();
    for repo_dir in ctx.layout().repository_directories()? {
        if !Layout::index_file(&repo_dir).is_file() {
            continue;
        }
        let index = CommandIndex::load(&repo_dir)?;
        results.extend(index.search_by_tags(&req.tags));
    }

    for r in results {
        let line = format!("{}: {}", r.name, r.command);
        if req.pretty {
            writeln!(out, "{}", line.blue())?;
        } else {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

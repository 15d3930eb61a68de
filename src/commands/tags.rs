use crate::context::AppContext;
use crate::error::Result;
use crate::index::CommandIndex;
use crate::layout::Layout;
use std::collections::BTreeSet;
use std::io::Write;

/// Print every tag used in any repository, once each.
pub fn run(ctx: &AppContext<'_>, out: &mut dyn Write) -> Result<()> {
    let mut all_tags = BTreeSet::new();
    for repo_dir in ctx.layout().repository_directories()? {
        if Layout::index_file(&repo_dir).is_file() {
            all_tags.extend(CommandIndex::load(&repo_dir)?.tags());
        }
    }
    for t in all_tags {
        writeln!(out, "{t}")?;
    }
    Ok(())
}

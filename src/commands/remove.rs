use crate::commands::record::checked_name;
use crate::context::AppContext;
use crate::error::Result;
use crate::functions::remove_function_file;
use crate::index::CommandIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveRequest {
    pub name: String,
}

/// Remove a command from the main index together with its fish function.
pub fn run(ctx: &AppContext<'_>, req: RemoveRequest) -> Result<()> {
    let name = checked_name(&req.name)?;
    let main_dir = ctx.layout().main_repository_dir();
    CommandIndex::remove(&main_dir, &name)?;
    remove_function_file(&main_dir, &name)?;
    log::info!("removed '{name}'");
    Ok(())
}

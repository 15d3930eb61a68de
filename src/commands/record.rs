use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::functions::ensure_function_file;
use crate::index::CommandIndex;
use regex::Regex;
use std::fs;
use std::sync::LazyLock;

static NAME_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRequest {
    pub name: String,
    pub command: String,
    pub tags: Vec<String>,
}

/// Normalize a command name: runs of whitespace or hyphens become a single `_`.
pub fn normalize_name(name: &str) -> String {
    NAME_SEPARATORS.replace_all(name.trim(), "_").into_owned()
}

/// Normalize `raw` and check that it can be used as a fish function file name.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] if the normalized name is empty, `.`/`..`, or
/// contains a path separator or NUL.
pub fn checked_name(raw: &str) -> Result<String> {
    let name = normalize_name(raw);
    if name.is_empty() {
        return Err(Error::InvalidArgument("Command name must not be empty".into()));
    }
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(Error::InvalidArgument(format!(
            "Command name '{name}' is not a valid fish function name"
        )));
    }
    Ok(name)
}

/// Upsert the command into the main index and generate its fish function.
///
/// The normalized name is used both as the index key and as the function name.
pub fn run(ctx: &AppContext<'_>, req: RecordRequest) -> Result<()> {
    let name = checked_name(&req.name)?;

    let layout = ctx.layout();
    let main_dir = layout.main_repository_dir();
    let functions_dir = layout.main_functions_dir();
    fs::create_dir_all(&functions_dir).map_err(Error::io(&functions_dir))?;

    CommandIndex::upsert(&main_dir, &name, &req.command, &req.tags)?;
    ensure_function_file(&main_dir, &name, &req.command)?;
    log::info!("recorded '{name}'");
    Ok(())
}

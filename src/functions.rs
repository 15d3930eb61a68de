//! Generated fish functions.
//!
//! Every recorded command gets `fish/<name>.fish`, a function that prints the command
//! text. Files are written once and never regenerated: recording a name again updates
//! the index but keeps the existing function file.

use crate::constants::{FISH_FUNCTION_EXTENSION, HISTORY_LOAD_FUNCTION_NAME};
use crate::error::{Error, Result};
use crate::layout::Layout;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const ECHO_COLOR: &str = "blue";

const HISTORY_ALIAS_BODY: &str = "
function h
    cr load && history merge
end
";

/// Write the function file for `name` unless it already exists.
///
/// Returns `true` if a file was written.
pub fn ensure_function_file(repo_dir: &Path, name: &str, command: &str) -> Result<bool> {
    let path = Layout::function_file(repo_dir, name);
    if path.exists() {
        log::debug!("function file {} already exists", path.display());
        return Ok(false);
    }
    fs::write(&path, render_function(name, command)).map_err(Error::io(&path))?;
    log::info!("created {}", path.display());
    Ok(true)
}

/// Delete the function file for `name`; a missing file is not an error.
pub fn remove_function_file(repo_dir: &Path, name: &str) -> Result<()> {
    let path = Layout::function_file(repo_dir, name);
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(&path)(e)),
    }
}

/// Write `h.fish` into `functions_dir` unless it already exists.
pub fn ensure_history_alias_file(functions_dir: &Path) -> Result<()> {
    let path = functions_dir.join(format!(
        "{HISTORY_LOAD_FUNCTION_NAME}.{FISH_FUNCTION_EXTENSION}"
    ));
    if path.exists() {
        return Ok(());
    }
    fs::write(&path, HISTORY_ALIAS_BODY).map_err(Error::io(&path))?;
    log::info!("created {}", path.display());
    Ok(())
}

fn render_function(name: &str, command: &str) -> String {
    format!(
        "\nfunction {name}\n    set_color {ECHO_COLOR}; echo '{}'; set_color normal\nend\n",
        escape_single_quoted(command)
    )
}

/// Escape text for a fish single-quoted string, where only `\` and `'` are special.
fn escape_single_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

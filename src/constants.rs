//! File and directory names shared across the storage layout.

/// Environment variable overriding the base directory.
pub const COMMAND_REMINDER_DIR_ENV: &str = "COMMAND_REMINDER_DIR";
/// Base directory used when `COMMAND_REMINDER_DIR` is unset, relative to `$HOME`.
pub const DEFAULT_BASE_DIR_NAME: &str = ".command-reminder";

pub const REPOSITORIES_DIR_NAME: &str = "repositories";
pub const MAIN_REPOSITORY_DIR_NAME: &str = "main";
pub const EXTERNAL_REPOSITORIES_DIR_NAME: &str = "external";

pub const COMMANDS_FILE_NAME: &str = "commands.json";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

pub const FISH_FUNCTIONS_DIR_NAME: &str = "fish";
pub const FISH_FUNCTION_EXTENSION: &str = "fish";
pub const FISH_FUNCTIONS_PATH_ENV: &str = "fish_function_path";

/// Name of the function (and file stem) that merges loaded commands into history.
pub const HISTORY_LOAD_FUNCTION_NAME: &str = "h";

/// Fish history location relative to the data directory (`$XDG_DATA_HOME` or `~/.local/share`).
pub const FISH_HISTORY_RELATIVE_PATH: &str = "fish/fish_history";

/// The only branch that is pulled from and pushed to.
pub const PRIMARY_BRANCH: &str = "main";
pub const REMOTE_NAME: &str = "origin";
pub const COMMIT_MESSAGE: &str = "update repo";

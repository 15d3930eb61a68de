//! # command-reminder (`cr`)
//!
//! Keep your most used shell commands at hand in fish.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create the main repository and load it in fish
//! cr init | source
//!
//! # Record a command
//! cr record --name "mongo login" --command "mongo --user a" --tags "#onduty #mongo"
//!
//! # Find it again
//! cr list --tags "#onduty"
//!
//! # Share it
//! cr push
//! ```
//!
//! ## Storage
//!
//! Everything lives under `$COMMAND_REMINDER_DIR` (default `~/.command-reminder`).
//! Set `RUST_LOG=debug` to trace file rewrites and git invocations.

use anyhow::Result;
use clap::Parser;
use command_reminder::{commands, Cli};

/// Main entry point for the `cr` CLI
///
/// Parses command-line arguments and delegates to the appropriate command handler.
/// If no command is provided, displays an error message and exits.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let cmd = cli.cmd.unwrap_or_else(|| {
        eprintln!("No command provided. Use --help to see available commands.");
        std::process::exit(1);
    });
    commands::run(cmd)
}

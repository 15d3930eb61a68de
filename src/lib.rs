//! # command-reminder library
//!
//! Storage, search and git synchronization of recorded shell commands.
//!
//! Each operation takes an already parsed request (see [`commands::Operation`]) and an
//! [`AppContext`](context::AppContext) carrying the resolved [`Configuration`](config::Configuration)
//! and a [`VersionControl`](git::VersionControl) backend.

use clap::Parser;

pub mod commands;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod functions;
pub mod git;
pub mod history;
pub mod index;
pub mod layout;
pub mod registry;

pub use error::{Error, Result};

/// Save and share your most used commands as fish functions
///
/// Commands are stored under a name and tags in a local repository that can be
/// synchronized with a git remote. Repositories shared by others can be pulled in
/// and are searched together with your own.
#[derive(Parser)]
#[command(
    name = "cr",
    version,
    about = "Save, tag and share your most used commands as fish functions",
    long_about = "Records frequently used shell commands under a name and tags, lists and searches them,\nloads them into the fish history and synchronizes them with git remotes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<commands::Commands>,
}

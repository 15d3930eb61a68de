use crate::config::Configuration;
use crate::context::AppContext;
use crate::error::Result;
use crate::git::GitCli;
use anyhow::Context;
use clap::Subcommand;
use regex::Regex;
use std::io::{self, BufRead, Write};
use std::sync::LazyLock;

pub mod completions;
pub mod init;
pub mod list;
pub mod load;
pub mod pull;
pub mod push;
pub mod record;
pub mod remove;
pub mod tags;

pub use init::InitRequest;
pub use list::ListRequest;
pub use load::LoadRequest;
pub use pull::PullRequest;
pub use record::RecordRequest;
pub use remove::RemoveRequest;

static TAGS_SPLITTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,]+").expect("valid regex"));

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Initialize the main repository and print the fish init script")]
    Init {
        /// Git remote to mirror the main repository with
        #[arg(short, long)]
        repo: Option<String>,
    },
    #[command(about = "Record a command under a name and tags")]
    Record {
        /// Name of the command, used as the fish function name
        #[arg(short, long)]
        name: String,
        /// Command to record
        #[arg(short, long)]
        command: String,
        /// Tags separated by spaces or commas
        #[arg(short, long, default_value = "")]
        tags: String,
    },
    #[command(about = "List commands having all the given tags")]
    List {
        /// Tags separated by spaces or commas
        #[arg(short, long, default_value = "")]
        tags: String,
        #[arg(short, long)]
        pretty: bool,
    },
    #[command(about = "List all known tags")]
    Tags,
    #[command(name = "rm", visible_alias = "remove", about = "Remove a recorded command")]
    Remove {
        /// Name of the command to remove
        #[arg(short = 'c', long = "command")]
        name: String,
    },
    #[command(about = "Append `name: command` lines from stdin to the fish history")]
    Load,
    #[command(about = "Pull an external commands repository, or refresh all of them")]
    Pull {
        #[arg(short, long)]
        repo: Option<String>,
        /// Refresh every previously pulled repository
        #[arg(short = 'u', long = "update-all")]
        update_all: bool,
    },
    #[command(about = "Push the main repository to its remote")]
    Push,
    #[command(about = "Emit shell completion scripts (bash/zsh/fish)")]
    Completions { shell: String },
}

/// A fully parsed request for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Init(InitRequest),
    Record(RecordRequest),
    List(ListRequest),
    Tags,
    Remove(RemoveRequest),
    Load(LoadRequest),
    Pull(PullRequest),
    Push,
}

/// Split a raw tag argument on whitespace and commas.
pub fn split_tags(raw: &str) -> Vec<String> {
    TAGS_SPLITTER
        .split(raw)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Commands {
    /// Turn parsed arguments into an [`Operation`]; `stdin` feeds `load`.
    ///
    /// Returns `None` for commands that do not touch the command store.
    pub fn into_operation(self, stdin: impl BufRead) -> io::Result<Option<Operation>> {
        let op = match self {
            Commands::Init { repo } => Operation::Init(InitRequest {
                repo_url: non_empty(repo),
            }),
            Commands::Record {
                name,
                command,
                tags,
            } => Operation::Record(RecordRequest {
                name,
                command,
                tags: split_tags(&tags),
            }),
            Commands::List { tags, pretty } => Operation::List(ListRequest {
                tags: split_tags(&tags),
                pretty,
            }),
            Commands::Tags => Operation::Tags,
            Commands::Remove { name } => Operation::Remove(RemoveRequest { name }),
            Commands::Load => Operation::Load(LoadRequest {
                lines: stdin.lines().collect::<io::Result<Vec<_>>>()?,
            }),
            Commands::Pull { repo, update_all } => Operation::Pull(PullRequest {
                repo_url: non_empty(repo),
                refresh_all: update_all,
            }),
            Commands::Push => Operation::Push,
            Commands::Completions { .. } => return Ok(None),
        };
        Ok(Some(op))
    }
}

/// Route an operation to its processor.
pub fn dispatch(ctx: &AppContext<'_>, op: Operation, out: &mut dyn Write) -> Result<()> {
    log::debug!("dispatching {op:?}");
    match op {
        Operation::Init(req) => init::run(ctx, req, out),
        Operation::Record(req) => record::run(ctx, req),
        Operation::List(req) => list::run(ctx, req, out),
        Operation::Tags => tags::run(ctx, out),
        Operation::Remove(req) => remove::run(ctx, req),
        Operation::Load(req) => load::run(ctx, req),
        Operation::Pull(req) => pull::run(ctx, req),
        Operation::Push => push::run(ctx),
    }
}

pub fn run(cmd: Commands) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Commands::Completions { shell } = &cmd {
        return completions::run(shell, &mut out);
    }

    let config = Configuration::from_env()?;
    log::debug!("using base directory {}", config.base_dir.display());
    let git = GitCli::default();
    let ctx = AppContext::new(&config, &git);

    let Some(op) = cmd
        .into_operation(io::stdin().lock())
        .context("reading standard input")?
    else {
        return Ok(());
    };
    dispatch(&ctx, op, &mut out)?;
    out.flush()?;
    Ok(())
}

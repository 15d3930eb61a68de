use crate::Cli;
use anyhow::{anyhow, Result};
use clap::CommandFactory;
use clap_complete::{
    generate,
    shells::{Bash, Fish, Zsh},
};
use std::io::Write;

pub fn run(shell: &str, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    match shell {
        "bash" => generate(Bash, &mut cmd, "cr", out),
        "zsh" => generate(Zsh, &mut cmd, "cr", out),
        "fish" => generate(Fish, &mut cmd, "cr", out),
        other => return Err(anyhow!("unsupported shell '{other}', choose: bash, zsh, fish")),
    }
    Ok(())
}

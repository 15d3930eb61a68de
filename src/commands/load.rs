use crate::context::AppContext;
use crate::error::Result;
use crate::history::{append_history_entries, parse_command_lines};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadRequest {
    /// Raw input lines, typically the output of `cr list`.
    pub lines: Vec<String>,
}

pub fn run(ctx: &AppContext<'_>, req: LoadRequest) -> Result<()> {
    let commands = parse_command_lines(&req.lines);
    let timestamp = chrono::Utc::now().timestamp();
    append_history_entries(&ctx.config.history_file, &commands, timestamp)
}

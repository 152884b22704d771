//! Subcommand routing

use tracing::debug;

use crate::cli::Commands;
use crate::commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use vibebench_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let result = match self {
            Commands::Merge(args) => commands::merge::execute(ctx.cli, args),
            Commands::Average(args) => commands::average::execute(ctx.cli, args),
            Commands::Report(args) => commands::report::execute(ctx.cli, args),
            Commands::Leaderboard(args) => commands::leaderboard::execute(ctx.cli, args),
        };
        debug!(elapsed = ?ctx.start.elapsed(), "execute_command");
        result
    }
}

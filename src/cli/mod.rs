//! CLI argument parsing for vibebench
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod output;
pub mod parse;

use clap::{Parser, Subcommand};

pub use args::{AverageArgs, LeaderboardArgs, MergeArgs, ReportArgs};
pub use output::OutputFormat;

/// Vibebench - aggregate coding benchmark results into ranked leaderboards
#[derive(Parser, Debug)]
#[command(name = "vibebench")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter (e.g. `info`, `debug`, or full directives)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge every per-model result file in a run directory
    Merge(MergeArgs),

    /// Average several merged run results into one document
    Average(AverageArgs),

    /// Render the Markdown benchmark report
    Report(ReportArgs),

    /// Render the PDF leaderboard
    Leaderboard(LeaderboardArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;
    use vibebench_core::merge::ConflictPolicy;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_merge_args() {
        let cli = Cli::try_parse_from([
            "vibebench",
            "merge",
            "runs/run1",
            "-o",
            "merged.json",
            "--on-conflict",
            "first-write-wins",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Merge(args)) => {
                assert_eq!(args.run_dir, PathBuf::from("runs/run1"));
                assert_eq!(args.output, PathBuf::from("merged.json"));
                assert_eq!(args.on_conflict, ConflictPolicy::FirstWriteWins);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_merge_requires_output() {
        assert!(Cli::try_parse_from(["vibebench", "merge", "runs/run1"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["vibebench", "leaderboard", "avg.json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Human);
        match cli.command {
            Some(Commands::Leaderboard(args)) => {
                assert_eq!(args.output, PathBuf::from("LEADERBOARD.pdf"));
                assert!(args.pricing.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["vibebench", "average"]).unwrap();
        match cli.command {
            Some(Commands::Average(args)) => {
                assert!(args.files.is_empty());
                assert_eq!(args.output, PathBuf::from("averaged_results.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "vibebench", "report", "avg.json", "--format", "json", "--quiet",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.quiet);
    }
}

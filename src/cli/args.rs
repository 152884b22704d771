use std::path::PathBuf;

use clap::Args;
use vibebench_core::merge::ConflictPolicy;

use super::parse::parse_conflict_policy;

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Run directory searched recursively for `*_results.json` files
    pub run_dir: PathBuf,

    /// Path of the merged document
    #[arg(long, short)]
    pub output: PathBuf,

    /// How to settle two files reporting the same case/model cell
    #[arg(
        long,
        value_parser = parse_conflict_policy,
        default_value = "last-write-wins"
    )]
    pub on_conflict: ConflictPolicy,
}

#[derive(Args, Debug, Clone)]
pub struct AverageArgs {
    /// Merged result documents, one per run
    pub files: Vec<PathBuf>,

    /// Path of the averaged document
    #[arg(long, short, default_value = "averaged_results.json")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Merged or averaged result document
    pub input: PathBuf,

    /// Path of the Markdown report
    #[arg(long, short, default_value = "BENCHMARK_REPORT.md")]
    pub output: PathBuf,

    /// TOML file with pricing overrides
    #[arg(long)]
    pub pricing: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct LeaderboardArgs {
    /// Merged or averaged result document
    pub input: PathBuf,

    /// Path of the PDF leaderboard
    #[arg(default_value = "LEADERBOARD.pdf")]
    pub output: PathBuf,

    /// TOML file with pricing overrides
    #[arg(long)]
    pub pricing: Option<PathBuf>,
}

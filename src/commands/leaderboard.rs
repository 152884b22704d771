//! `vibebench leaderboard`

use serde_json::json;

use crate::cli::{Cli, LeaderboardArgs, OutputFormat};
use vibebench_core::error::Result;
use vibebench_core::render::LeaderboardRenderer;

use super::{load_calculator, print_json};

pub fn execute(cli: &Cli, args: &LeaderboardArgs) -> Result<()> {
    let renderer = LeaderboardRenderer::new(load_calculator(args.pricing.as_deref())?);
    let summary = renderer.write_pdf(&args.input, &args.output)?;

    match cli.format {
        OutputFormat::Json => print_json(&json!({
            "status": "rendered",
            "format": "pdf",
            "input": args.input.display().to_string(),
            "output": summary.output.display().to_string(),
            "models": summary.models,
            "cases": summary.cases,
            "bytes": summary.bytes,
        }))?,
        OutputFormat::Human if cli.quiet => {}
        OutputFormat::Human => {
            println!("PDF leaderboard created: {}", summary.output.display())
        }
    }

    Ok(())
}

//! `vibebench report`

use serde_json::json;

use crate::cli::{Cli, OutputFormat, ReportArgs};
use vibebench_core::error::Result;
use vibebench_core::render::LeaderboardRenderer;

use super::{load_calculator, print_json};

pub fn execute(cli: &Cli, args: &ReportArgs) -> Result<()> {
    let renderer = LeaderboardRenderer::new(load_calculator(args.pricing.as_deref())?);
    let summary = renderer.write_markdown(&args.input, &args.output)?;

    match cli.format {
        OutputFormat::Json => print_json(&json!({
            "status": "rendered",
            "format": "markdown",
            "input": args.input.display().to_string(),
            "output": summary.output.display().to_string(),
            "models": summary.models,
            "cases": summary.cases,
            "bytes": summary.bytes,
        }))?,
        OutputFormat::Human if cli.quiet => {}
        OutputFormat::Human => println!("Report generated at {}", summary.output.display()),
    }

    Ok(())
}

//! `vibebench average`

use serde_json::json;

use crate::cli::{AverageArgs, Cli, OutputFormat};
use vibebench_core::average::{average_files, AverageOutcome};
use vibebench_core::error::Result;

use super::print_json;

pub fn execute(cli: &Cli, args: &AverageArgs) -> Result<()> {
    let outcome = average_files(&args.files, &args.output)?;

    match cli.format {
        OutputFormat::Json => {
            let value = match &outcome {
                AverageOutcome::NoInput => json!({ "status": "empty", "files": 0 }),
                AverageOutcome::Averaged(summary) => json!({
                    "status": "averaged",
                    "files": summary.inputs.len(),
                    "models": summary.models,
                    "cases": summary.cases,
                    "output": summary.output.display().to_string(),
                }),
            };
            print_json(&value)?;
        }
        OutputFormat::Human if cli.quiet => {}
        OutputFormat::Human => match &outcome {
            AverageOutcome::NoInput => println!("No files to average."),
            AverageOutcome::Averaged(summary) => {
                println!("Averaged {} runs", summary.inputs.len());
                println!("Averaged results saved to {}", summary.output.display());
            }
        },
    }

    Ok(())
}

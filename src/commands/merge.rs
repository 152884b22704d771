//! `vibebench merge`

use serde_json::json;

use crate::cli::{Cli, MergeArgs, OutputFormat};
use vibebench_core::error::Result;
use vibebench_core::merge::{merge_run_dir, MergeOutcome};

use super::print_json;

pub fn execute(cli: &Cli, args: &MergeArgs) -> Result<()> {
    let outcome = merge_run_dir(&args.run_dir, &args.output, args.on_conflict)?;

    match cli.format {
        OutputFormat::Json => {
            let value = match &outcome {
                MergeOutcome::NoMatchingFiles => json!({
                    "status": "empty",
                    "run_dir": args.run_dir.display().to_string(),
                    "files": 0,
                }),
                MergeOutcome::Merged(summary) => json!({
                    "status": "merged",
                    "run_dir": args.run_dir.display().to_string(),
                    "files": summary.files.len(),
                    "models": summary.models,
                    "cases": summary.cases,
                    "conflicts": summary.conflicts,
                    "policy": summary.policy.to_string(),
                    "output": summary.output.display().to_string(),
                }),
            };
            print_json(&value)?;
        }
        OutputFormat::Human if cli.quiet => {}
        OutputFormat::Human => match &outcome {
            MergeOutcome::NoMatchingFiles => {
                println!("Found 0 result files in {}", args.run_dir.display());
                println!("No files found.");
            }
            MergeOutcome::Merged(summary) => {
                println!(
                    "Found {} result files in {}",
                    summary.files.len(),
                    args.run_dir.display()
                );
                if summary.conflicts > 0 {
                    println!(
                        "Resolved {} conflicting case/model pairs ({})",
                        summary.conflicts, summary.policy
                    );
                }
                println!("Merged run data saved to {}", summary.output.display());
            }
        },
    }

    Ok(())
}

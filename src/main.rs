//! Vibebench - benchmark result aggregation and leaderboard CLI
//!
//! Merges per-model result files from a run, averages runs, and renders
//! ranked leaderboards as a Markdown report or a PDF table.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use vibebench_core::error::BenchError;
use vibebench_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return exit_on_parse_error(err),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&cli, &e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Argument errors honor `--format json` even though `Cli` never parsed.
fn exit_on_parse_error(err: clap::Error) -> ExitCode {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
        || !json_format_requested(env::args().skip(1))
    {
        err.exit();
    }

    let error = bench_error_from_clap(&err);
    eprintln!("{}", error.to_json());
    ExitCode::from(error.exit_code() as u8)
}

fn bench_error_from_clap(err: &clap::Error) -> BenchError {
    match err.kind() {
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::ArgumentConflict => BenchError::UsageError(err.to_string()),
        _ => BenchError::Other(err.to_string()),
    }
}

fn report_error(cli: &Cli, error: &BenchError) {
    match cli.format {
        OutputFormat::Json => eprintln!("{}", error.to_json()),
        OutputFormat::Human if cli.quiet => {}
        OutputFormat::Human => eprintln!("error: {}", error),
    }
}

/// Whether the raw arguments ask for `--format json` (either spelling).
fn json_format_requested(args: impl IntoIterator<Item = String>) -> bool {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format=json" => return true,
            "--format" if args.next().as_deref() == Some("json") => return true,
            _ => {}
        }
    }
    false
}

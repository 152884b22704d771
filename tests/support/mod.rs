use assert_cmd::{cargo::cargo_bin_cmd, Command};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// Get a Command for vibebench
pub fn vibebench() -> Command {
    cargo_bin_cmd!("vibebench")
}

/// One model's raw result for one case: (case, score, time, input, output)
pub type CaseRow<'a> = (&'a str, f64, f64, u64, u64);

/// Build a single-model raw result document in the runner's layout
pub fn raw_result(timestamp: &str, model: &str, rows: &[CaseRow]) -> Value {
    let mut case_results = serde_json::Map::new();
    let mut details = serde_json::Map::new();
    for (case, score, time, input, output) in rows {
        case_results.insert(
            case.to_string(),
            json!({
                "absolute_scores": { model: { "total_score": score, "grader": "rubric" } },
                "comparisons": []
            }),
        );
        details.insert(
            case.to_string(),
            json!({
                "absolute_scores": { model: { "total_score": score } },
                "model_metrics": {
                    model: {
                        "time_seconds": time,
                        "turns": 4,
                        "files_created": 2,
                        "input_tokens": input,
                        "output_tokens": output
                    }
                }
            }),
        );
    }
    let cases: Vec<&str> = rows.iter().map(|r| r.0).collect();
    json!({
        "timestamp": timestamp,
        "models": [model],
        "cases": cases,
        "case_results": case_results,
        "case_results_details": details,
    })
}

/// Write `value` as pretty JSON, creating parent directories
pub fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

#[allow(dead_code)]
pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// Populate `run_dir` with two models' result files over two cases
#[allow(dead_code)]
pub fn write_sample_run(run_dir: &Path, offset: f64) {
    write_json(
        &run_dir.join("gpt-5.2/openai_gpt-5.2_results.json"),
        &raw_result(
            "2026-01-29T10:15:00",
            "openai/gpt-5.2",
            &[
                ("case_01", 70.0 + offset, 30.0, 100_000, 20_000),
                ("case_02", 74.0 + offset, 50.0, 300_000, 40_000),
            ],
        ),
    );
    write_json(
        &run_dir.join("claude/anthropic_claude-sonnet-4.5_results.json"),
        &raw_result(
            "2026-01-29T11:00:00",
            "anthropic/claude-sonnet-4.5",
            &[
                ("case_01", 80.0 + offset, 40.0, 1_000_000, 250_000),
                ("case_02", 82.0 + offset, 60.0, 1_000_000, 250_000),
            ],
        ),
    );
}

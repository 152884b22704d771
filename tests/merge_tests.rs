//! `vibebench merge` against real run directories

mod support;

use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use support::{raw_result, read_json, vibebench, write_json, write_sample_run};
use tempfile::tempdir;

#[test]
fn test_merge_run_directory() {
    let dir = tempdir().unwrap();
    write_sample_run(&dir.path().join("runs/run1"), 0.0);
    // non-result JSON is ignored
    write_json(
        &dir.path().join("runs/run1/notes.json"),
        &serde_json::json!({"ignored": true}),
    );

    vibebench()
        .current_dir(dir.path())
        .args(["merge", "runs/run1", "-o", "out/merged.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 result files in runs/run1"))
        .stdout(predicate::str::contains(
            "Merged run data saved to out/merged.json",
        ));

    let merged = read_json(&dir.path().join("out/merged.json"));
    // sorted discovery puts claude/ before gpt-5.2/
    assert_eq!(merged["timestamp"], "2026-01-29T11:00:00");
    assert_eq!(
        merged["models"],
        serde_json::json!(["anthropic/claude-sonnet-4.5", "openai/gpt-5.2"])
    );
    assert_eq!(merged["cases"], serde_json::json!(["case_01", "case_02"]));
    assert_eq!(
        merged["case_results"]["case_02"]["absolute_scores"]["openai/gpt-5.2"]["total_score"],
        74.0
    );
    assert_eq!(
        merged["case_results"]["case_01"]["comparisons"],
        serde_json::json!([])
    );
    assert_eq!(
        merged["case_results_details"]["case_01"]["model_metrics"]
            ["anthropic/claude-sonnet-4.5"]["input_tokens"],
        1_000_000.0
    );
    // unknown fields survive the merge
    assert_eq!(
        merged["case_results"]["case_01"]["absolute_scores"]["openai/gpt-5.2"]["grader"],
        "rubric"
    );
}

#[test]
fn test_merge_empty_directory_is_idempotent() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("empty")).unwrap();

    for _ in 0..2 {
        vibebench()
            .current_dir(dir.path())
            .args(["merge", "empty", "-o", "merged.json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No files found."));
        assert!(!dir.path().join("merged.json").exists());
    }
}

#[test]
fn test_merge_missing_directory_finds_nothing() {
    let dir = tempdir().unwrap();
    vibebench()
        .current_dir(dir.path())
        .args(["--format", "json", "merge", "nowhere", "-o", "merged.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"empty\""));
    assert!(!dir.path().join("merged.json").exists());
}

#[test]
fn test_merge_json_summary() {
    let dir = tempdir().unwrap();
    write_sample_run(&dir.path().join("run1"), 0.0);

    let output = vibebench()
        .current_dir(dir.path())
        .args(["--format", "json", "merge", "run1", "-o", "merged.json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["status"], "merged");
    assert_eq!(summary["files"], 2);
    assert_eq!(summary["models"], 2);
    assert_eq!(summary["cases"], 2);
    assert_eq!(summary["conflicts"], 0);
    assert_eq!(summary["policy"], "last-write-wins");
}

#[test]
fn test_malformed_file_aborts_with_data_error() {
    let dir = tempdir().unwrap();
    write_sample_run(&dir.path().join("run1"), 0.0);
    fs::write(dir.path().join("run1/broken_results.json"), "{ not json").unwrap();

    vibebench()
        .current_dir(dir.path())
        .args(["merge", "run1", "-o", "merged.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("broken_results.json"));
    assert!(!dir.path().join("merged.json").exists());
}

fn write_conflicting_run(run_dir: &std::path::Path) {
    write_json(
        &run_dir.join("a_results.json"),
        &raw_result("2026-01-01T00:00:00", "m", &[("case_01", 40.0, 1.0, 10, 10)]),
    );
    write_json(
        &run_dir.join("b_results.json"),
        &raw_result("2026-01-02T00:00:00", "m", &[("case_01", 60.0, 1.0, 10, 10)]),
    );
}

#[test]
fn test_conflicts_last_write_wins_by_default() {
    let dir = tempdir().unwrap();
    write_conflicting_run(&dir.path().join("run"));

    vibebench()
        .current_dir(dir.path())
        .args(["merge", "run", "-o", "merged.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved 1 conflicting case/model pairs"));

    let merged = read_json(&dir.path().join("merged.json"));
    assert_eq!(
        merged["case_results"]["case_01"]["absolute_scores"]["m"]["total_score"],
        60.0
    );
}

#[test]
fn test_conflicts_first_write_wins() {
    let dir = tempdir().unwrap();
    write_conflicting_run(&dir.path().join("run"));

    vibebench()
        .current_dir(dir.path())
        .args([
            "merge",
            "run",
            "-o",
            "merged.json",
            "--on-conflict",
            "first-write-wins",
        ])
        .assert()
        .success();

    let merged = read_json(&dir.path().join("merged.json"));
    assert_eq!(
        merged["case_results"]["case_01"]["absolute_scores"]["m"]["total_score"],
        40.0
    );
}

#[test]
fn test_conflicts_error_policy() {
    let dir = tempdir().unwrap();
    write_conflicting_run(&dir.path().join("run"));

    let output = vibebench()
        .current_dir(dir.path())
        .args([
            "--format",
            "json",
            "merge",
            "run",
            "-o",
            "merged.json",
            "--on-conflict",
            "error",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let envelope: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(envelope["error"]["type"], "conflict");
    assert_eq!(envelope["error"]["case"], "case_01");
    assert_eq!(envelope["error"]["model"], "m");
    assert!(!dir.path().join("merged.json").exists());
}

#[test]
fn test_unknown_conflict_policy_is_usage_error() {
    vibebench()
        .args(["merge", "run", "-o", "m.json", "--on-conflict", "newest"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown conflict policy"));
}

//! Leaderboard artifacts: Markdown report and PDF table
//!
//! [`LeaderboardRenderer`] loads a document once, builds the shared
//! [`Leaderboard`] rows, and hands them to whichever format was asked for.

pub mod markdown;
pub mod pdf;
pub mod pdf_doc;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info};

use crate::document::ResultDocument;
use crate::error::{BenchError, Result};
use crate::leaderboard::Leaderboard;
use crate::pricing::CostCalculator;
use crate::trace_time;

pub use markdown::render_markdown;
pub use pdf::render_pdf;

/// What a render call wrote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSummary {
    pub output: PathBuf,
    pub models: usize,
    pub cases: usize,
    pub bytes: usize,
}

/// Renders leaderboard artifacts using an injected cost calculator
#[derive(Debug, Clone, Default)]
pub struct LeaderboardRenderer {
    calculator: CostCalculator,
}

impl LeaderboardRenderer {
    pub fn new(calculator: CostCalculator) -> Self {
        Self { calculator }
    }

    pub fn leaderboard(&self, doc: &ResultDocument) -> Leaderboard {
        let start = Instant::now();
        let leaderboard = Leaderboard::build(doc, &self.calculator);
        trace_time!(start, "build_leaderboard", rows = leaderboard.rows.len());
        leaderboard
    }

    /// Load `input` and write the Markdown report to `output`.
    #[tracing::instrument(skip(self, input, output), fields(input = %input.display()))]
    pub fn write_markdown(&self, input: &Path, output: &Path) -> Result<RenderSummary> {
        let doc = ResultDocument::load(input)?;
        let leaderboard = self.leaderboard(&doc);
        let report = render_markdown(&doc, &leaderboard);
        write_artifact(output, report.as_bytes())?;
        info!(output = %output.display(), "wrote markdown report");
        Ok(summary(&leaderboard, output, report.len()))
    }

    /// Load `input` and write the PDF leaderboard to `output`.
    #[tracing::instrument(skip(self, input, output), fields(input = %input.display()))]
    pub fn write_pdf(&self, input: &Path, output: &Path) -> Result<RenderSummary> {
        let doc = ResultDocument::load(input)?;
        let leaderboard = self.leaderboard(&doc);
        let bytes = render_pdf(&leaderboard, Local::now());
        write_artifact(output, &bytes)?;
        info!(output = %output.display(), "wrote pdf leaderboard");
        Ok(summary(&leaderboard, output, bytes.len()))
    }
}

fn summary(leaderboard: &Leaderboard, output: &Path, bytes: usize) -> RenderSummary {
    RenderSummary {
        output: output.to_path_buf(),
        models: leaderboard.model_count,
        cases: leaderboard.case_count,
        bytes,
    }
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| BenchError::io_operation("create directory", parent.display(), e))?;
    }
    debug!(path = %path.display(), bytes = bytes.len(), "writing artifact");
    fs::write(path, bytes).map_err(|e| BenchError::io_operation("write", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ScoreEntry;
    use tempfile::tempdir;

    fn write_doc(path: &Path) {
        let mut doc = ResultDocument {
            timestamp: Some("2026-02-01T09:00:00".to_string()),
            models: vec!["openai/gpt-5.2".to_string()],
            cases: vec!["case_01".to_string()],
            ..Default::default()
        };
        doc.case_results
            .entry("case_01".to_string())
            .or_default()
            .absolute_scores
            .insert("openai/gpt-5.2".to_string(), ScoreEntry::new(64.0));
        doc.save(path).unwrap();
    }

    #[test]
    fn test_write_markdown_and_pdf() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("merged.json");
        write_doc(&input);
        let renderer = LeaderboardRenderer::default();

        let md_path = dir.path().join("out/REPORT.md");
        let summary = renderer.write_markdown(&input, &md_path).unwrap();
        assert_eq!(summary.models, 1);
        let md = fs::read_to_string(&md_path).unwrap();
        assert!(md.contains("| 1 | `openai/gpt-5.2` | **64.0** |"));

        let pdf_path = dir.path().join("LEADERBOARD.pdf");
        let summary = renderer.write_pdf(&input, &pdf_path).unwrap();
        let bytes = fs::read(&pdf_path).unwrap();
        assert_eq!(summary.bytes, bytes.len());
        assert!(bytes.starts_with(b"%PDF-1.4"));
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempdir().unwrap();
        let err = LeaderboardRenderer::default()
            .write_pdf(&dir.path().join("nope.json"), &dir.path().join("x.pdf"))
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::ExitCode::Failure);
        assert!(!dir.path().join("x.pdf").exists());
    }
}

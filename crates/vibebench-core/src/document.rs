//! Result documents exchanged between pipeline stages
//!
//! One shape covers the raw per-run files written by the scoring harness,
//! merged documents, and averaged documents (which add `runs_averaged`).
//! Maps are insertion-ordered so documents round-trip in the order they
//! were built.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{BenchError, Result};

/// File name suffix of raw per-model result files.
pub const RESULT_FILE_SUFFIX: &str = "_results.json";

/// A benchmark result document (raw, merged, or averaged)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultDocument {
    /// ISO-8601 timestamp. Raw files carry the run time; averaged documents
    /// carry the time of averaging.
    #[serde(default)]
    pub timestamp: Option<String>,

    /// Number of documents combined by the averager
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runs_averaged: Option<usize>,

    #[serde(default)]
    pub models: Vec<String>,

    #[serde(default)]
    pub cases: Vec<String>,

    #[serde(default)]
    pub case_results: IndexMap<String, CaseResult>,

    #[serde(default)]
    pub case_results_details: IndexMap<String, CaseResult>,
}

/// Per-case block of scores and metrics, keyed by model id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    #[serde(default)]
    pub absolute_scores: IndexMap<String, ScoreEntry>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub model_metrics: IndexMap<String, ModelMetrics>,

    /// Pairwise comparisons; carried through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparisons: Option<Vec<Value>>,
}

/// One model's absolute score on one case
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,

    /// Harness-specific fields (score breakdowns, judge notes)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScoreEntry {
    pub fn new(total_score: f64) -> Self {
        Self {
            total_score: Some(total_score),
            extra: Map::new(),
        }
    }
}

/// Execution metrics for one model on one case
///
/// Every field is optional: harness versions differ in what they record,
/// and a missing field must never be read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_seconds: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turns: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_created: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The numeric metric fields the averager understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    TimeSeconds,
    Turns,
    FilesCreated,
    InputTokens,
    OutputTokens,
}

impl MetricField {
    pub const ALL: [MetricField; 5] = [
        MetricField::TimeSeconds,
        MetricField::Turns,
        MetricField::FilesCreated,
        MetricField::InputTokens,
        MetricField::OutputTokens,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MetricField::TimeSeconds => "time_seconds",
            MetricField::Turns => "turns",
            MetricField::FilesCreated => "files_created",
            MetricField::InputTokens => "input_tokens",
            MetricField::OutputTokens => "output_tokens",
        }
    }
}

impl ModelMetrics {
    pub fn get(&self, field: MetricField) -> Option<f64> {
        match field {
            MetricField::TimeSeconds => self.time_seconds,
            MetricField::Turns => self.turns,
            MetricField::FilesCreated => self.files_created,
            MetricField::InputTokens => self.input_tokens,
            MetricField::OutputTokens => self.output_tokens,
        }
    }

    pub fn set(&mut self, field: MetricField, value: Option<f64>) {
        let slot = match field {
            MetricField::TimeSeconds => &mut self.time_seconds,
            MetricField::Turns => &mut self.turns,
            MetricField::FilesCreated => &mut self.files_created,
            MetricField::InputTokens => &mut self.input_tokens,
            MetricField::OutputTokens => &mut self.output_tokens,
        };
        *slot = value;
    }

    /// True when none of the known numeric fields is present.
    pub fn is_empty(&self) -> bool {
        MetricField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    /// Input plus output tokens, or `None` when neither is recorded.
    pub fn total_tokens(&self) -> Option<f64> {
        match (self.input_tokens, self.output_tokens) {
            (None, None) => None,
            (input, output) => Some(input.unwrap_or(0.0) + output.unwrap_or(0.0)),
        }
    }
}

impl ResultDocument {
    /// Read and parse a result document.
    ///
    /// Unparsable JSON is reported as [`BenchError::Parse`] naming the file.
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| BenchError::io_operation("read", path.display(), e))?;
        Self::parse(&content, path)
    }

    /// Parse a document from a string; `path` is used for error reporting.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|source| BenchError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the document as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| BenchError::io_operation("create directory", parent.display(), e))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| BenchError::io_operation("write", path.display(), e))?;
        Ok(())
    }

    /// Append a model id unless already present.
    pub fn add_model(&mut self, model: &str) {
        if !self.models.iter().any(|m| m == model) {
            self.models.push(model.to_string());
        }
    }

    /// Append a case id unless already present.
    pub fn add_case(&mut self, case: &str) {
        if !self.cases.iter().any(|c| c == case) {
            self.cases.push(case.to_string());
        }
    }

    /// Score for (case, model), from `case_results` or else the details block.
    pub fn score(&self, case: &str, model: &str) -> Option<f64> {
        let lookup = |blocks: &IndexMap<String, CaseResult>| {
            blocks
                .get(case)
                .and_then(|c| c.absolute_scores.get(model))
                .and_then(|s| s.total_score)
        };
        lookup(&self.case_results).or_else(|| lookup(&self.case_results_details))
    }

    /// Metrics for (case, model), from the details block or else `case_results`.
    pub fn metrics(&self, case: &str, model: &str) -> Option<&ModelMetrics> {
        metrics_in(&self.case_results_details, case, model)
            .or_else(|| metrics_in(&self.case_results, case, model))
    }

    /// Calendar date of the timestamp, if it starts with `YYYY-MM-DD`.
    pub fn date(&self) -> Option<NaiveDate> {
        let ts = self.timestamp.as_deref()?;
        let prefix = ts.get(..10)?;
        NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
    }

    /// Describe every broken document invariant.
    ///
    /// Documents come from an external harness, so violations are reported
    /// rather than rejected.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for (label, ids) in [("model", &self.models), ("case", &self.cases)] {
            for (i, id) in ids.iter().enumerate() {
                if ids[..i].contains(id) {
                    problems.push(format!("duplicate {} id {}", label, id));
                }
            }
        }

        for (block_name, blocks) in [
            ("case_results", &self.case_results),
            ("case_results_details", &self.case_results_details),
        ] {
            for (case, block) in blocks {
                for (model, entry) in &block.absolute_scores {
                    if !self.models.contains(model) {
                        problems.push(format!(
                            "{}.{} scores unknown model {}",
                            block_name, case, model
                        ));
                    }
                    if let Some(score) = entry.total_score {
                        if !(0.0..=100.0).contains(&score) {
                            problems.push(format!(
                                "{}.{} score {} for {} is outside 0-100",
                                block_name, case, score, model
                            ));
                        }
                    }
                }
                for (model, metrics) in &block.model_metrics {
                    if !self.models.contains(model) {
                        problems.push(format!(
                            "{}.{} has metrics for unknown model {}",
                            block_name, case, model
                        ));
                    }
                    for field in MetricField::ALL {
                        if metrics.get(field).is_some_and(|v| v < 0.0) {
                            problems.push(format!(
                                "{}.{} {} for {} is negative",
                                block_name,
                                case,
                                field.name(),
                                model
                            ));
                        }
                    }
                }
            }
        }

        problems
    }
}

fn metrics_in<'a>(
    blocks: &'a IndexMap<String, CaseResult>,
    case: &str,
    model: &str,
) -> Option<&'a ModelMetrics> {
    blocks.get(case).and_then(|c| c.model_metrics.get(model))
}

//! Average several result documents (independent runs) into one
//!
//! Every score and metric cell is the mean over the documents that actually
//! report it. Cells nobody reported are left out of the output.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::document::{CaseResult, MetricField, ModelMetrics, ResultDocument, ScoreEntry};
use crate::error::Result;
use crate::stats::{round_to, Accumulator};
use crate::trace_time;

/// Decimal places kept for averaged scores
pub const SCORE_DECIMALS: i32 = 1;
/// Decimal places kept for averaged metrics
pub const METRIC_DECIMALS: i32 = 2;

/// Result of an averaging invocation
#[derive(Debug, Clone, PartialEq)]
pub enum AverageOutcome {
    /// No input files were given; nothing was written
    NoInput,
    Averaged(AverageSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageSummary {
    pub inputs: Vec<PathBuf>,
    pub models: usize,
    pub cases: usize,
    pub output: PathBuf,
}

/// Combines N >= 1 merged or averaged documents.
///
/// Assumes every input shares the first document's `models` and `cases`;
/// the output copies both lists from the first document.
#[derive(Debug, Default)]
pub struct ResultAverager {
    documents: Vec<ResultDocument>,
}

impl ResultAverager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, doc: ResultDocument) {
        self.documents.push(doc);
    }

    /// Average with the current local time as the output timestamp.
    pub fn average(&self) -> Option<ResultDocument> {
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        self.average_at(timestamp)
    }

    /// Average the collected documents, stamping the output with `timestamp`.
    ///
    /// Returns `None` when no documents were added.
    pub fn average_at(&self, timestamp: String) -> Option<ResultDocument> {
        let first = self.documents.first()?;
        self.warn_on_universe_mismatch(first);

        let mut averaged = ResultDocument {
            timestamp: Some(timestamp),
            runs_averaged: Some(self.documents.len()),
            models: first.models.clone(),
            cases: first.cases.clone(),
            case_results: IndexMap::new(),
            case_results_details: IndexMap::new(),
        };

        for case in &first.cases {
            let mut scores = IndexMap::new();
            let mut metrics = IndexMap::new();

            for model in &first.models {
                if let Some(score) = self.average_score(case, model) {
                    scores.insert(model.clone(), ScoreEntry::new(score));
                }
                if let Some(m) = self.average_metrics(case, model) {
                    metrics.insert(model.clone(), m);
                }
            }

            averaged.case_results.insert(
                case.clone(),
                CaseResult {
                    absolute_scores: scores.clone(),
                    ..Default::default()
                },
            );
            averaged.case_results_details.insert(
                case.clone(),
                CaseResult {
                    absolute_scores: scores,
                    model_metrics: metrics,
                    comparisons: None,
                },
            );
        }

        Some(averaged)
    }

    fn average_score(&self, case: &str, model: &str) -> Option<f64> {
        let mut acc = Accumulator::default();
        for doc in &self.documents {
            acc.push_opt(doc.score(case, model));
        }
        acc.mean().map(|mean| round_to(mean, SCORE_DECIMALS))
    }

    fn average_metrics(&self, case: &str, model: &str) -> Option<ModelMetrics> {
        let mut fields = MetricField::ALL.map(|_| Accumulator::default());
        for doc in &self.documents {
            let Some(metrics) = doc.metrics(case, model) else {
                continue;
            };
            for (acc, field) in fields.iter_mut().zip(MetricField::ALL) {
                acc.push_opt(metrics.get(field));
            }
        }

        let mut averaged = ModelMetrics::default();
        for (acc, field) in fields.iter().zip(MetricField::ALL) {
            averaged.set(field, acc.mean().map(|m| round_to(m, METRIC_DECIMALS)));
        }

        if averaged.is_empty() {
            None
        } else {
            Some(averaged)
        }
    }

    fn warn_on_universe_mismatch(&self, first: &ResultDocument) {
        for (i, doc) in self.documents.iter().enumerate().skip(1) {
            if doc.models != first.models || doc.cases != first.cases {
                warn!(
                    document = i,
                    "models/cases differ from the first document; using the first document's lists"
                );
            }
        }
    }
}

/// Load every file, average them, and write the result to `output`.
///
/// All inputs are read before anything is written; any unreadable or
/// malformed file aborts the stage.
#[tracing::instrument(skip(files, output), fields(files = files.len(), output = %output.display()))]
pub fn average_files(files: &[PathBuf], output: &Path) -> Result<AverageOutcome> {
    let start = Instant::now();
    let mut averager = ResultAverager::new();
    for path in files {
        let doc = ResultDocument::load(path)?;
        debug!(path = %path.display(), "loaded document");
        averager.add(doc);
    }
    trace_time!(start, "load_documents");

    let Some(averaged) = averager.average() else {
        info!("no documents to average");
        return Ok(AverageOutcome::NoInput);
    };

    averaged.save(output)?;
    trace_time!(start, "average_files");

    Ok(AverageOutcome::Averaged(AverageSummary {
        inputs: files.to_vec(),
        models: averaged.models.len(),
        cases: averaged.cases.len(),
        output: output.to_path_buf(),
    }))
}

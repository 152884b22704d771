//! Ranked leaderboard rows derived from a merged or averaged document
//!
//! Ranking:
//! - A model's score is the mean `total_score` over the cases that actually
//!   report a score for it; missing cases are not zero-filled.
//! - Models are ranked by that mean, descending.
//! - Tie-break policy **stable input order**: equal means keep the relative
//!   order of the document's `models` list. No secondary key is used.
//! - A model with no score in any case has no mean. It is kept as an
//!   unranked row (`rank == None`, rendered `N/A`) after every ranked row,
//!   in input order.

pub mod format;
pub mod names;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::document::ResultDocument;
use crate::pricing::CostCalculator;
use crate::stats::Accumulator;

pub use names::shorten_model_name;

/// One model's line on the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    /// 1-based rank; `None` for models without any score
    pub rank: Option<usize>,
    pub model: String,
    pub mean_score: Option<f64>,
    /// Cases contributing to `mean_score`
    pub cases_scored: usize,
    pub avg_time_seconds: Option<f64>,
    pub avg_tokens_per_case: Option<f64>,
    pub total_input_tokens: f64,
    pub total_output_tokens: f64,
    pub total_cost: f64,
    /// Cost was computed with the default rates (model not in the table)
    pub default_pricing: bool,
}

/// Rows plus the document facts both renderers print
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    pub rows: Vec<LeaderboardRow>,
    pub timestamp: Option<String>,
    pub date: Option<NaiveDate>,
    pub runs_averaged: Option<usize>,
    pub case_count: usize,
    pub model_count: usize,
}

impl Leaderboard {
    /// Compute and rank one row per model of `doc`.
    pub fn build(doc: &ResultDocument, calculator: &CostCalculator) -> Self {
        for problem in doc.invariant_violations() {
            warn!(%problem, "result document invariant violated");
        }

        let rows: Vec<LeaderboardRow> = doc
            .models
            .iter()
            .map(|model| build_row(doc, model, calculator))
            .collect();

        Self {
            rows: rank_rows(rows),
            timestamp: doc.timestamp.clone(),
            date: doc.date(),
            runs_averaged: doc.runs_averaged,
            case_count: doc.cases.len(),
            model_count: doc.models.len(),
        }
    }

    /// Ranked rows only (those with a mean score)
    pub fn ranked(&self) -> impl Iterator<Item = &LeaderboardRow> {
        self.rows.iter().filter(|r| r.rank.is_some())
    }

    /// Models whose cost fell back to the default rates
    pub fn default_priced_models(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|r| r.default_pricing)
            .map(|r| r.model.as_str())
            .collect()
    }
}

fn build_row(doc: &ResultDocument, model: &str, calculator: &CostCalculator) -> LeaderboardRow {
    let mut scores = Accumulator::default();
    let mut times = Accumulator::default();
    let mut tokens = Accumulator::default();
    let mut input_tokens = 0.0;
    let mut output_tokens = 0.0;

    for case in &doc.cases {
        scores.push_opt(doc.score(case, model));

        if let Some(metrics) = doc.metrics(case, model) {
            times.push_opt(metrics.time_seconds);
            tokens.push_opt(metrics.total_tokens());
            input_tokens += metrics.input_tokens.unwrap_or(0.0);
            output_tokens += metrics.output_tokens.unwrap_or(0.0);
        }
    }

    let default_pricing = !calculator.is_priced(model);
    if default_pricing {
        warn!(model, "no pricing entry; using default rates");
    }
    if scores.count() == 0 {
        debug!(model, "model has no scores; listing as unranked");
    }

    LeaderboardRow {
        rank: None,
        model: model.to_string(),
        mean_score: scores.mean(),
        cases_scored: scores.count(),
        avg_time_seconds: times.mean(),
        avg_tokens_per_case: tokens.mean(),
        total_input_tokens: input_tokens,
        total_output_tokens: output_tokens,
        total_cost: calculator.cost(model, input_tokens, output_tokens),
        default_pricing,
    }
}

/// Sort by mean score (descending, stable) and assign ranks.
fn rank_rows(rows: Vec<LeaderboardRow>) -> Vec<LeaderboardRow> {
    let (mut ranked, unranked): (Vec<_>, Vec<_>) =
        rows.into_iter().partition(|r| r.mean_score.is_some());

    // sort_by is stable, which is what keeps ties in input order
    ranked.sort_by(|a, b| {
        let a = a.mean_score.unwrap_or(f64::NEG_INFINITY);
        let b = b.mean_score.unwrap_or(f64::NEG_INFINITY);
        b.total_cmp(&a)
    });

    for (i, row) in ranked.iter_mut().enumerate() {
        row.rank = Some(i + 1);
    }

    ranked.extend(unranked);
    ranked
}

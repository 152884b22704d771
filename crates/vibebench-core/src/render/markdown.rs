//! Markdown benchmark report
//!
//! Layout: header facts, the ranked leaderboard table, a differentiation
//! summary (how far apart models land per case), and a case x model score
//! matrix whose columns follow leaderboard order.

use std::fmt::Write as _;

use crate::document::ResultDocument;
use crate::leaderboard::format::{format_cost, format_score, format_time, format_tokens, MISSING};
use crate::leaderboard::{shorten_model_name, Leaderboard, LeaderboardRow};
use crate::stats::{median, population_std_dev};

pub const REPORT_TITLE: &str = "# Vibe Code Bench - Final Report";

/// Header line of the leaderboard table
pub const LEADERBOARD_HEADER: &str =
    "| Rank | Model | Score | Avg Time (s) | Avg Tokens | Total Cost |";

/// Render the full report.
pub fn render_markdown(doc: &ResultDocument, leaderboard: &Leaderboard) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(REPORT_TITLE.to_string());
    lines.push(format!(
        "**Date:** {}",
        leaderboard.timestamp.as_deref().unwrap_or(MISSING)
    ));
    if let Some(runs) = leaderboard.runs_averaged {
        lines.push(format!("**Runs averaged:** {}", runs));
    }
    lines.push(format!(
        "**Cases:** {} | **Models:** {}",
        leaderboard.case_count, leaderboard.model_count
    ));
    lines.push(String::new());

    lines.push("## Leaderboard".to_string());
    lines.push(LEADERBOARD_HEADER.to_string());
    lines.push("|------|-------|-------|--------------|------------|------------|".to_string());
    for row in &leaderboard.rows {
        lines.push(leaderboard_line(row));
    }

    let default_priced = leaderboard.default_priced_models();
    if !default_priced.is_empty() {
        lines.push(String::new());
        let models: Vec<String> = default_priced.iter().map(|m| format!("`{}`", m)).collect();
        lines.push(format!(
            "_Cost uses default rates for: {}_",
            models.join(", ")
        ));
    }
    lines.push(String::new());

    let gaps = case_score_gaps(doc);
    lines.push("## Differentiation Summary".to_string());
    lines.push(format!(
        "- Median score gap per case: {:.1}",
        median(&gaps).unwrap_or(0.0)
    ));
    lines.push(format!(
        "- Score gap standard deviation: {:.1}",
        population_std_dev(&gaps)
    ));
    lines.push(String::new());

    lines.push("## Case Breakdown".to_string());
    lines.extend(case_matrix(doc, leaderboard));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn leaderboard_line(row: &LeaderboardRow) -> String {
    let rank = row.rank.map_or_else(|| "-".to_string(), |r| r.to_string());
    let score = match row.mean_score {
        Some(_) => format!("**{}**", format_score(row.mean_score)),
        None => MISSING.to_string(),
    };
    format!(
        "| {} | `{}` | {} | {} | {} | {} |",
        rank,
        row.model,
        score,
        format_time(row.avg_time_seconds),
        format_tokens(row.avg_tokens_per_case),
        format_cost(row.total_cost)
    )
}

/// Spread between the best and worst reported score, per case with scores.
fn case_score_gaps(doc: &ResultDocument) -> Vec<f64> {
    doc.cases
        .iter()
        .filter_map(|case| {
            let scores: Vec<f64> = doc
                .models
                .iter()
                .filter_map(|model| doc.score(case, model))
                .collect();
            let max = scores.iter().copied().reduce(f64::max)?;
            let min = scores.iter().copied().reduce(f64::min)?;
            Some(max - min)
        })
        .collect()
}

fn case_matrix(doc: &ResultDocument, leaderboard: &Leaderboard) -> Vec<String> {
    let mut header = String::from("| Case |");
    for row in &leaderboard.rows {
        let _ = write!(header, " `{}` |", shorten_model_name(&row.model));
    }

    let mut lines = vec![
        header,
        format!("|{}", "---|".repeat(leaderboard.rows.len() + 1)),
    ];

    for case in &doc.cases {
        let mut line = format!("| `{}` |", case);
        for row in &leaderboard.rows {
            let cell = doc
                .score(case, &row.model)
                .map_or_else(|| "-".to_string(), |s| format!("{:.1}", s));
            let _ = write!(line, " {} |", cell);
        }
        lines.push(line);
    }

    lines
}

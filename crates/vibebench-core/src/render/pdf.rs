//! Single-page PDF leaderboard
//!
//! Landscape letter page: centered title and evaluation date, then a table
//! with a dark header row and alternating row shading, then a footer line
//! with the case and model counts. Rows shrink to fit the page so a large
//! model list still lands on one page.

use chrono::{DateTime, Local};

use super::pdf_doc::{text_width, write_single_page, Canvas, Font, PdfInfo, Rgb};
use crate::leaderboard::format::{format_cost, format_score, format_time, format_tokens, MISSING};
use crate::leaderboard::{shorten_model_name, Leaderboard, LeaderboardRow};

pub const PDF_TITLE: &str = "Vibe Code Bench - Leaderboard";

const PAGE_WIDTH: f64 = 792.0;
const PAGE_HEIGHT: f64 = 612.0;
const MARGIN: f64 = 50.0;
const TABLE_TOP: f64 = 510.0;
const TABLE_BOTTOM: f64 = 60.0;
const MAX_ROW_HEIGHT: f64 = 24.0;
const MAX_FONT_SIZE: f64 = 10.0;
const CELL_PADDING: f64 = 4.0;

const HEADER_BG: &str = "#2c3e50";
const STRIPE_BG: &str = "#f8f9fa";
const GRID: &str = "#dddddd";
const SUBTITLE: &str = "#666666";
const FOOTER: &str = "#999999";

const COLUMNS: [(&str, f64); 6] = [
    ("Rank", 0.08),
    ("Model", 0.32),
    ("Score", 0.12),
    ("Avg Time (s)", 0.16),
    ("Avg Tokens", 0.16),
    ("Total Cost", 0.16),
];

/// Render the leaderboard page, stamping `generated_at` into the metadata.
pub fn render_pdf(leaderboard: &Leaderboard, generated_at: DateTime<Local>) -> Vec<u8> {
    let mut canvas = Canvas::new();
    let center = PAGE_WIDTH / 2.0;

    canvas.text_centered(center, 562.0, Font::HelveticaBold, 20.0, Rgb::BLACK, PDF_TITLE);
    let date = leaderboard
        .date
        .map_or_else(|| MISSING.to_string(), |d| d.format("%Y-%m-%d").to_string());
    canvas.text_centered(
        center,
        538.0,
        Font::Helvetica,
        12.0,
        Rgb::hex(SUBTITLE),
        &format!("Evaluation Date: {}", date),
    );

    draw_table(&mut canvas, &leaderboard.rows);

    canvas.text_centered(
        center,
        30.0,
        Font::Helvetica,
        9.0,
        Rgb::hex(FOOTER),
        &format!(
            "Based on {} evaluation cases | {} models tested",
            leaderboard.case_count, leaderboard.model_count
        ),
    );

    let info = PdfInfo {
        title: PDF_TITLE.to_string(),
        created: generated_at,
    };
    write_single_page(PAGE_WIDTH, PAGE_HEIGHT, &canvas, &info)
}

fn row_cells(row: &LeaderboardRow) -> [String; 6] {
    [
        row.rank.map_or_else(|| "-".to_string(), |r| r.to_string()),
        shorten_model_name(&row.model),
        format_score(row.mean_score),
        format_time(row.avg_time_seconds),
        format_tokens(row.avg_tokens_per_case),
        format_cost(row.total_cost),
    ]
}

fn draw_table(canvas: &mut Canvas, rows: &[LeaderboardRow]) {
    let table_width = PAGE_WIDTH - 2.0 * MARGIN;
    let row_height = MAX_ROW_HEIGHT.min((TABLE_TOP - TABLE_BOTTOM) / (rows.len() + 1) as f64);
    let font_size = MAX_FONT_SIZE.min(row_height * 0.45);

    let mut edges = Vec::with_capacity(COLUMNS.len() + 1);
    let mut x = MARGIN;
    edges.push(x);
    for (_, fraction) in COLUMNS {
        x += table_width * fraction;
        edges.push(x);
    }

    let header: Vec<String> = COLUMNS.iter().map(|(name, _)| name.to_string()).collect();
    let mut top = TABLE_TOP;
    canvas.fill_rect(MARGIN, top - row_height, table_width, row_height, Rgb::hex(HEADER_BG));
    draw_cells(canvas, &edges, top, row_height, font_size, Font::HelveticaBold, Rgb::WHITE, &header);
    top -= row_height;

    for (i, row) in rows.iter().enumerate() {
        if i % 2 == 1 {
            canvas.fill_rect(MARGIN, top - row_height, table_width, row_height, Rgb::hex(STRIPE_BG));
        }
        let cells = row_cells(row);
        draw_cells(canvas, &edges, top, row_height, font_size, Font::Helvetica, Rgb::BLACK, &cells);
        top -= row_height;
    }

    let grid = Rgb::hex(GRID);
    let mut y = TABLE_TOP;
    for _ in 0..=rows.len() + 1 {
        canvas.line((MARGIN, y), (MARGIN + table_width, y), 0.5, grid);
        y -= row_height;
    }
    for edge in &edges {
        canvas.line((*edge, TABLE_TOP), (*edge, top), 0.5, grid);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_cells(
    canvas: &mut Canvas,
    edges: &[f64],
    top: f64,
    row_height: f64,
    font_size: f64,
    font: Font,
    color: Rgb,
    cells: &[String],
) {
    let baseline = top - row_height / 2.0 - font_size * 0.35;
    for (i, cell) in cells.iter().enumerate() {
        let (left, right) = (edges[i], edges[i + 1]);
        let available = right - left - 2.0 * CELL_PADDING;
        let text = fit_text(cell, font, font_size, available);
        canvas.text_centered((left + right) / 2.0, baseline, font, font_size, color, &text);
    }
}

/// Truncate `text` with a trailing `...` until it fits in `width` points.
fn fit_text(text: &str, font: Font, size: f64, width: f64) -> String {
    if text_width(text, font, size) <= width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + "...";
        if text_width(&candidate, font, size) <= width {
            return candidate;
        }
    }
    String::new()
}

//! Minimal single-page PDF 1.4 writer
//!
//! Supports filled rectangles, stroked lines, and text in the two standard
//! Helvetica faces (no embedding required). Content streams are written
//! uncompressed.

use std::fmt::Write as _;

use chrono::{DateTime, Local};

/// Standard fonts available on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }
}

/// RGB color with 0-255 channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Parse `#rrggbb`; anything else yields black.
    pub fn hex(code: &str) -> Rgb {
        let digits = code.trim_start_matches('#');
        let channel = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .unwrap_or(0)
        };
        if digits.len() == 6 {
            Rgb(channel(0), channel(2), channel(4))
        } else {
            Rgb::BLACK
        }
    }

    fn components(self) -> String {
        format!(
            "{:.3} {:.3} {:.3}",
            self.0 as f64 / 255.0,
            self.1 as f64 / 255.0,
            self.2 as f64 / 255.0
        )
    }
}

/// Approximate advance width of `text` in points.
///
/// Uses Helvetica's per-class glyph widths (in 1/1000 em); close enough to
/// center and fit text, which is all the layout needs.
pub fn text_width(text: &str, font: Font, size: f64) -> f64 {
    let units: f64 = text
        .chars()
        .map(|c| match c {
            ' ' | '.' | ',' | ':' | ';' | '!' | '/' | '\'' | 'i' | 'j' | 'l' | 'I' => 278.0,
            '|' => 260.0,
            '-' | '(' | ')' | 'r' | 't' | 'f' => 333.0,
            'm' => 833.0,
            'w' => 722.0,
            'M' => 833.0,
            'W' => 944.0,
            '0'..='9' | '$' | '#' | '_' => 556.0,
            'a'..='z' => 556.0,
            'A'..='Z' => 667.0,
            _ => 600.0,
        })
        .sum();
    let factor = match font {
        Font::Helvetica => 1.0,
        Font::HelveticaBold => 1.06,
    };
    units * factor * size / 1000.0
}

/// Escape text for a PDF literal string; non-ASCII becomes `?`.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            c if c.is_ascii_graphic() || c == ' ' => out.push(c),
            c if c.is_control() => out.push(' '),
            _ => out.push('?'),
        }
    }
    out
}

/// Drawing operations for one page, in PDF user space (origin bottom-left)
#[derive(Debug, Default)]
pub struct Canvas {
    ops: String,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        let _ = writeln!(
            self.ops,
            "{} rg {:.2} {:.2} {:.2} {:.2} re f",
            color.components(),
            x,
            y,
            width,
            height
        );
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgb) {
        let _ = writeln!(
            self.ops,
            "{} RG {:.2} w {:.2} {:.2} m {:.2} {:.2} l S",
            color.components(),
            width,
            from.0,
            from.1,
            to.0,
            to.1
        );
    }

    /// Draw `text` with its baseline starting at (x, y).
    pub fn text(&mut self, x: f64, y: f64, font: Font, size: f64, color: Rgb, text: &str) {
        let _ = writeln!(
            self.ops,
            "BT /{} {:.2} Tf {} rg {:.2} {:.2} Td ({}) Tj ET",
            font.resource_name(),
            size,
            color.components(),
            x,
            y,
            escape_text(text)
        );
    }

    /// Draw `text` horizontally centered on `center_x`.
    pub fn text_centered(
        &mut self,
        center_x: f64,
        y: f64,
        font: Font,
        size: f64,
        color: Rgb,
        text: &str,
    ) {
        let x = center_x - text_width(text, font, size) / 2.0;
        self.text(x, y, font, size, color, text);
    }

    pub fn content(&self) -> &str {
        &self.ops
    }
}

/// Document-level metadata written to the Info dictionary
#[derive(Debug, Clone)]
pub struct PdfInfo {
    pub title: String,
    pub created: DateTime<Local>,
}

/// Serialize one page of `width` x `height` points.
pub fn write_single_page(width: f64, height: f64, canvas: &Canvas, info: &PdfInfo) -> Vec<u8> {
    let content = canvas.content();
    let fonts = [Font::Helvetica, Font::HelveticaBold];

    let mut objects: Vec<String> = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.0} {:.0}] \
             /Resources << /Font << /{} 4 0 R /{} 5 0 R >> >> /Contents 6 0 R >>",
            width,
            height,
            fonts[0].resource_name(),
            fonts[1].resource_name()
        ),
    ];
    for font in fonts {
        objects.push(format!(
            "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
            font.base_font()
        ));
    }
    objects.push(format!(
        "<< /Length {} >>\nstream\n{}endstream",
        content.len(),
        content
    ));
    objects.push(format!(
        "<< /Title ({}) /Producer (vibebench) /CreationDate (D:{}) >>",
        escape_text(&info.title),
        info.created.format("%Y%m%d%H%M%S")
    ));

    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in &offsets {
        let _ = write!(xref, "{:010} 00000 n \n", offset);
    }
    let info_id = objects.len();
    let _ = write!(
        xref,
        "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        info_id,
        xref_offset
    );
    out.extend_from_slice(xref.as_bytes());
    out
}

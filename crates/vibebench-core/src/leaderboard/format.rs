//! Fixed number formats shared by the renderers

/// Placeholder for a value that was never observed
pub const MISSING: &str = "N/A";

/// Score with one decimal, or `N/A`
pub fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| MISSING.to_string(), |s| format!("{:.1}", s))
}

/// Seconds with one decimal, or `N/A`
pub fn format_time(seconds: Option<f64>) -> String {
    seconds.map_or_else(|| MISSING.to_string(), |s| format!("{:.1}", s))
}

/// Token count truncated to an integer and grouped by thousands, or `N/A`
pub fn format_tokens(tokens: Option<f64>) -> String {
    tokens.map_or_else(|| MISSING.to_string(), |t| group_thousands(t.trunc() as i64))
}

/// Currency with a `$` prefix and two decimals
pub fn format_cost(cost: f64) -> String {
    format!("${:.2}", cost)
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_and_time() {
        assert_eq!(format_score(Some(81.0)), "81.0");
        assert_eq!(format_score(Some(72.34)), "72.3");
        assert_eq!(format_score(None), "N/A");
        assert_eq!(format_time(Some(120.45)), "120.5");
    }

    #[test]
    fn test_tokens_grouped() {
        assert_eq!(format_tokens(Some(0.0)), "0");
        assert_eq!(format_tokens(Some(999.9)), "999");
        assert_eq!(format_tokens(Some(1000.0)), "1,000");
        assert_eq!(format_tokens(Some(1_234_567.8)), "1,234,567");
        assert_eq!(format_tokens(None), "N/A");
    }

    #[test]
    fn test_cost() {
        assert_eq!(format_cost(13.5), "$13.50");
        assert_eq!(format_cost(0.0), "$0.00");
    }
}

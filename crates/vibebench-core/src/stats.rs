//! Numeric helpers shared by the averager and the renderers

/// Running `(sum, count)` pair for one field.
///
/// Only observed values are pushed, so a field missing from some documents
/// is excluded from the denominator instead of counted as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn push_opt(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.push(v);
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Arithmetic mean, or `None` when nothing was observed.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Upper median (`sorted[len / 2]`); `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(sorted[sorted.len() / 2])
}

/// Population standard deviation; `0.0` for fewer than two values.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_ignores_missing() {
        let mut acc = Accumulator::default();
        acc.push_opt(Some(10.0));
        acc.push_opt(None);
        acc.push_opt(Some(20.0));
        assert_eq!(acc.count(), 2);
        assert_eq!(acc.mean(), Some(15.0));
    }

    #[test]
    fn test_empty_accumulator_has_no_mean() {
        assert_eq!(Accumulator::default().mean(), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(86.66666, 1), 86.7);
        assert_eq!(round_to(13.4999, 2), 13.5);
        assert_eq!(round_to(2.0, 2), 2.0);
    }

    #[test]
    fn test_median_takes_upper_middle() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(3.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_population_std_dev() {
        assert_eq!(population_std_dev(&[5.0]), 0.0);
        assert_eq!(population_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0);
    }
}

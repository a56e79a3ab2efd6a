//! Descriptive statistics over numeric slices.
//!
//! Every function is total: an empty slice yields 0 rather than NaN, and
//! higher moments of a zero-variance sample are 0.

use empirica_model::NumericStats;
use serde::Serialize;

/// IQR multiplier used by [`outlier_summary`].
pub const IQR_MULTIPLIER: f64 = 1.5;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `n`).
pub fn std_dev(values: &[f64]) -> f64 {
    central_moment(values, 2).sqrt()
}

pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Sorted copy of `values`.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Nearest-rank quantile of an already sorted slice: `sorted[floor(n·p)]`,
/// clamped to the last element.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (sorted.len() as f64 * p).floor() as usize;
    sorted[rank.min(sorted.len() - 1)]
}

/// `(Q1, Q3)` by nearest rank.
pub fn quartiles(values: &[f64]) -> (f64, f64) {
    let sorted = sorted(values);
    (quantile_sorted(&sorted, 0.25), quantile_sorted(&sorted, 0.75))
}

/// Median; the mean of the two middle values for even-length input.
pub fn median(values: &[f64]) -> f64 {
    let sorted = sorted(values);
    let n = sorted.len();
    match n {
        0 => 0.0,
        _ if n % 2 == 1 => sorted[n / 2],
        _ => (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0,
    }
}

/// Population skewness `m3 / m2^1.5`.
pub fn skewness(values: &[f64]) -> f64 {
    let m2 = central_moment(values, 2);
    if m2 == 0.0 {
        return 0.0;
    }
    central_moment(values, 3) / m2.powf(1.5)
}

/// Excess kurtosis `m4 / m2² − 3`.
pub fn kurtosis(values: &[f64]) -> f64 {
    let m2 = central_moment(values, 2);
    if m2 == 0.0 {
        return 0.0;
    }
    central_moment(values, 4) / (m2 * m2) - 3.0
}

fn central_moment(values: &[f64], order: i32) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    values.iter().map(|x| (x - mean).powi(order)).sum::<f64>() / values.len() as f64
}

/// Full numeric summary of a sample.
pub fn describe(values: &[f64]) -> NumericStats {
    let sorted = sorted(values);
    NumericStats {
        mean: mean(values),
        std: std_dev(values),
        min: min(values),
        max: max(values),
        median: median(values),
        q1: quantile_sorted(&sorted, 0.25),
        q3: quantile_sorted(&sorted, 0.75),
        skewness: skewness(values),
        kurtosis: kurtosis(values),
    }
}

/// IQR outlier overview for display.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlierSummary {
    pub count: usize,
    /// Share of values outside the bounds, in percent.
    pub percentage: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Count values outside `[Q1 − 1.5·IQR, Q3 + 1.5·IQR]`.
pub fn outlier_summary(values: &[f64]) -> OutlierSummary {
    if values.is_empty() {
        return OutlierSummary::default();
    }
    let (q1, q3) = quartiles(values);
    let iqr = q3 - q1;
    let lower = q1 - IQR_MULTIPLIER * iqr;
    let upper = q3 + IQR_MULTIPLIER * iqr;
    let count = values.iter().filter(|&&x| x < lower || x > upper).count();
    OutlierSummary {
        count,
        percentage: count as f64 / values.len() as f64 * 100.0,
        lower,
        upper,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(median(&[]), 0.0);
        assert_eq!(describe(&[]), NumericStats::default());
    }

    #[test]
    fn population_std() {
        // Sample std would be ~2.138; population std is exactly 2.
        assert!(close(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0));
    }

    #[test]
    fn nearest_rank_quartiles() {
        assert_eq!(quartiles(&[100.0, 1.0, 3.0, 2.0, 4.0]), (2.0, 4.0));
    }

    #[test]
    fn median_of_even_length() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn symmetric_sample_has_zero_skew() {
        assert!(close(skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]), 0.0));
        assert!(close(kurtosis(&[1.0, 2.0, 3.0, 4.0, 5.0]), -1.3));
        assert!(skewness(&[1.0, 1.0, 1.0, 10.0]) > 0.0);
    }

    #[test]
    fn constant_sample_has_zero_moments() {
        assert_eq!(skewness(&[3.0; 4]), 0.0);
        assert_eq!(kurtosis(&[3.0; 4]), 0.0);
    }

    #[test]
    fn iqr_summary_flags_the_spike() {
        let summary = outlier_summary(&[1.0, 2.0, 3.0, 4.0, 100.0]);
        assert_eq!(summary.count, 1);
        assert!(close(summary.percentage, 20.0));
        assert!(close(summary.lower, -1.0));
        assert!(close(summary.upper, 7.0));
    }
}

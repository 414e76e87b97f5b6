//! Statistical aggregation of trial samples.
//!
//! Reduces the successful durations collected for one chunk size into a
//! single result row: arithmetic mean plus a 95% confidence half-width.
//! The half-width uses the normal approximation `1.96 * stddev / sqrt(n)`
//! with the population standard deviation, deliberately without a
//! t-distribution correction, so that results stay comparable with earlier
//! runs of this harness.

use serde::Serialize;

/// z-score for a 95% confidence interval under the normal approximation.
pub const CONFIDENCE_Z: f64 = 1.96;

/// One row of the result table: a measured chunk size with its summary
/// statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateResult {
    /// The swept chunk size this row describes.
    pub k: u32,

    /// Arithmetic mean of the successful trial durations, in milliseconds.
    pub avg_time: f64,

    /// 95% confidence half-width around the mean, in milliseconds.
    pub ci: f64,
}

/// Fold a sample set of successful trial durations into a result row.
///
/// Returns `None` for an empty sample set: a chunk size that lost every
/// repetition contributes no row at all rather than a fabricated zero.
/// A single-element sample yields a half-width of exactly zero since one
/// observation carries no variance information.
pub fn aggregate(k: u32, samples: &[f64]) -> Option<AggregateResult> {
    if samples.is_empty() {
        return None;
    }

    let n = samples.len() as f64;
    let avg_time = samples.iter().sum::<f64>() / n;

    let ci = if samples.len() < 2 {
        0.0
    } else {
        CONFIDENCE_Z * (population_std_dev(samples, avg_time) / n.sqrt())
    };

    Some(AggregateResult { k, avg_time, ci })
}

/// Population standard deviation: σ = √(Σ(x - μ)² / N).
fn population_std_dev(samples: &[f64], mean: f64) -> f64 {
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_empty_sample_set_yields_no_row() {
        assert_eq!(aggregate(20, &[]), None);
    }

    #[test]
    fn test_single_sample_half_width_is_zero() {
        let row = aggregate(1, &[42.5]).unwrap();
        assert_eq!(row.k, 1);
        assert!((row.avg_time - 42.5).abs() < EPSILON);
        assert_eq!(row.ci, 0.0);
    }

    #[test]
    fn test_half_width_formula_exact() {
        let samples = [10.0, 12.0, 11.0];
        let row = aggregate(1, &samples).unwrap();

        assert!((row.avg_time - 11.0).abs() < EPSILON);

        // Population variance of [10, 12, 11] is 2/3.
        let expected_ci = CONFIDENCE_Z * (2.0f64 / 3.0).sqrt() / 3.0f64.sqrt();
        assert!((row.ci - expected_ci).abs() < EPSILON);
        assert!(row.ci >= 0.0);
    }

    #[test]
    fn test_half_width_non_negative_for_identical_samples() {
        let row = aggregate(50, &[5.0, 5.0, 5.0, 5.0]).unwrap();
        assert!((row.avg_time - 5.0).abs() < EPSILON);
        assert!(row.ci.abs() < EPSILON);
    }

    #[test]
    fn test_larger_sample() {
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0];
        let row = aggregate(100, &samples).unwrap();

        assert!((row.avg_time - 3.0).abs() < EPSILON);

        // Population std dev of 1..=5 is sqrt(2).
        let expected_ci = CONFIDENCE_Z * 2.0f64.sqrt() / 5.0f64.sqrt();
        assert!((row.ci - expected_ci).abs() < EPSILON);
    }
}

//! Per-asset and pairwise return statistics.
//!
//! Every dispersion measure here uses the population convention (divide by N),
//! which is what the textbook two-security tables are computed with.

use serde::{Deserialize, Serialize};

use crate::types::{AssetStats, ReturnPair, ReturnSeries};
use crate::{Error, Result};

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (sum of squared deviations divided by N).
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn population_std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Population covariance of two equally long slices.
///
/// Fails with [`Error::LengthMismatch`] when the slices differ in length.
pub fn population_covariance(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            s: x.len(),
            t: y.len(),
        });
    }
    if x.is_empty() {
        return Ok(0.0);
    }
    let (mx, my) = (mean(x), mean(y));
    Ok(x.iter()
        .zip(y)
        .map(|(a, b)| (a - mx) * (b - my))
        .sum::<f64>()
        / x.len() as f64)
}

/// Pearson correlation coefficient.
///
/// Fails with [`Error::UndefinedCorrelation`] when either series has zero
/// variance, and with [`Error::InvalidInput`] when the returns are so large
/// that the variances or covariance overflow. The result is clamped to [-1, 1].
pub fn correlation(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            s: x.len(),
            t: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(Error::InsufficientData(format!(
            "correlation needs at least 2 rows, got {}",
            x.len()
        )));
    }

    let (flat_x, flat_y) = (is_constant(x), is_constant(y));
    if flat_x || flat_y {
        let which = match (flat_x, flat_y) {
            (true, true) => "both series are",
            (true, false) => "first series is",
            _ => "second series is",
        };
        return Err(Error::UndefinedCorrelation(format!(
            "{} constant (zero variance)",
            which
        )));
    }

    let (var_x, var_y) = (population_variance(x), population_variance(y));
    let cov = population_covariance(x, y)?;
    if !(var_x.is_finite() && var_y.is_finite() && cov.is_finite()) {
        return Err(Error::InvalidInput(
            "returns too large: variance or covariance overflows".to_string(),
        ));
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    if !r.is_finite() {
        return Err(Error::UndefinedCorrelation(format!(
            "coefficient is not finite ({})",
            r
        )));
    }
    if r.abs() > 1.0 {
        tracing::debug!(r, "clamping correlation rounding overshoot");
    }
    Ok(r.clamp(-1.0, 1.0))
}

// Equality against the first value rather than `std_dev == 0.0`: the mean of
// a constant series can be off by an ulp, leaving a tiny nonzero variance.
fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first) || population_std_dev(values) == 0.0,
        None => true,
    }
}

impl AssetStats {
    /// Mean and population standard deviation of a series.
    pub fn from_series(series: &ReturnSeries) -> Self {
        let values = series.values();
        Self {
            mean: mean(values),
            std_dev: population_std_dev(values),
        }
    }
}

/// Statistics of both securities plus their correlation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PairStatistics {
    pub s: AssetStats,
    pub t: AssetStats,
    pub correlation: f64,
}

impl PairStatistics {
    /// Compute statistics for a cleaned pair.
    pub fn from_pair(pair: &ReturnPair) -> Result<Self> {
        let correlation = correlation(pair.s().values(), pair.t().values())?;
        Ok(Self {
            s: AssetStats::from_series(pair.s()),
            t: AssetStats::from_series(pair.t()),
            correlation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_pair() -> ReturnPair {
        ReturnPair::new(
            vec![0.066, 0.056, -0.090, 0.126, 0.140],
            vec![0.245, -0.059, 0.199, -0.078, 0.148],
        )
        .unwrap()
    }

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_population_std_dev_divides_by_n() {
        // Deviations -2..2 around 3: squared sum 10, / 5 = 2
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(population_variance(&values), 2.0);
        assert_relative_eq!(population_std_dev(&values), 2.0_f64.sqrt());

        // Sample convention would give 2.5
        assert!((population_variance(&values) - 2.5).abs() > 0.1);
    }

    #[test]
    fn test_population_covariance() {
        let x = [2.0, 4.0, 6.0];
        let y = [1.0, 3.0, 2.0];
        // mean x = 4, mean y = 2; products: (-2)(-1) + 0 + (2)(0) = 2; / 3
        assert_relative_eq!(
            population_covariance(&x, &y).unwrap(),
            2.0 / 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_population_covariance_rejects_unequal_lengths() {
        let result = population_covariance(&[0.1, 0.2, 0.3], &[0.1, 0.3]);
        assert!(matches!(result, Err(Error::LengthMismatch { s: 3, t: 2 })));
    }

    #[test]
    fn test_correlation_rejects_unequal_lengths() {
        let result = correlation(&[0.1, 0.2, 0.3], &[0.1, 0.3]);
        assert!(matches!(result, Err(Error::LengthMismatch { s: 3, t: 2 })));
    }

    #[test]
    fn test_correlation_empty_is_insufficient() {
        assert!(matches!(
            correlation(&[], &[]),
            Err(Error::InsufficientData(_))
        ));
    }

    #[test]
    fn test_correlation_overflow_is_an_error() {
        let x = [1e298, -1e298, 5e297];
        let y = [2e298, 1e297, -3e297];

        let result = correlation(&x, &y);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_reference_statistics() {
        let stats = PairStatistics::from_pair(&reference_pair()).unwrap();

        assert_relative_eq!(stats.s.mean, 0.0596, epsilon = 1e-12);
        assert_relative_eq!(stats.t.mean, 0.0910, epsilon = 1e-12);
        assert_relative_eq!(stats.s.std_dev, 0.0816176, epsilon = 1e-6);
        assert_relative_eq!(stats.t.std_dev, 0.1339328, epsilon = 1e-6);
        assert_relative_eq!(stats.correlation, -0.3891584, epsilon = 1e-6);
    }

    #[test]
    fn test_correlation_perfect() {
        let x = [0.01, 0.03, -0.02, 0.05];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 0.01).collect();
        assert_relative_eq!(correlation(&x, &y).unwrap(), 1.0, epsilon = 1e-12);

        let z: Vec<f64> = x.iter().map(|v| -v).collect();
        assert_relative_eq!(correlation(&x, &z).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_correlation_bounded() {
        let r = correlation(&[0.1, 0.2, 0.3, 0.4], &[0.3, 0.1, 0.4, 0.2]).unwrap();
        assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn test_correlation_constant_series() {
        let s = [0.05, 0.05, 0.05, 0.05, 0.05];
        let t = [0.01, 0.02, 0.03, 0.04, 0.05];

        assert!(matches!(
            correlation(&s, &t),
            Err(Error::UndefinedCorrelation(_))
        ));
        assert!(matches!(
            correlation(&t, &s),
            Err(Error::UndefinedCorrelation(_))
        ));
    }

    #[test]
    fn test_pair_statistics_constant_series() {
        let pair = ReturnPair::new(vec![0.05; 5], vec![0.01, 0.02, 0.03, 0.04, 0.05]).unwrap();
        assert!(matches!(
            PairStatistics::from_pair(&pair),
            Err(Error::UndefinedCorrelation(_))
        ));
    }
}

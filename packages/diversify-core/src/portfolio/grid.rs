//! Portfolio grid: expected return and risk for each weight mix.

use crate::stats::PairStatistics;
use crate::types::{PortfolioRow, WeightPair};

/// A labelled weight mix on the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub label: &'static str,
    pub weights: WeightPair,
}

/// The six grid mixes, ordered from all-S to all-T.
pub const CANONICAL_WEIGHTS: [GridPoint; 6] = [
    GridPoint {
        label: "All S (100/0)",
        weights: WeightPair::fixed(1.0, 0.0),
    },
    GridPoint {
        label: "A (80/20)",
        weights: WeightPair::fixed(0.8, 0.2),
    },
    GridPoint {
        label: "B (60/40)",
        weights: WeightPair::fixed(0.6, 0.4),
    },
    GridPoint {
        label: "C (40/60)",
        weights: WeightPair::fixed(0.4, 0.6),
    },
    GridPoint {
        label: "D (20/80)",
        weights: WeightPair::fixed(0.2, 0.8),
    },
    GridPoint {
        label: "All T (0/100)",
        weights: WeightPair::fixed(0.0, 1.0),
    },
];

/// Weighted mean return: `w_s * mean_s + w_t * mean_t`.
pub fn portfolio_return(weights: WeightPair, stats: &PairStatistics) -> f64 {
    weights.weight_s * stats.s.mean + weights.weight_t * stats.t.mean
}

/// Two-asset portfolio variance.
///
/// `w_s² σ_s² + w_t² σ_t² + 2 w_s w_t σ_s σ_t ρ`
pub fn portfolio_variance(weights: WeightPair, stats: &PairStatistics) -> f64 {
    let WeightPair { weight_s, weight_t } = weights;
    let (sd_s, sd_t) = (stats.s.std_dev, stats.t.std_dev);

    weight_s.powi(2) * sd_s.powi(2)
        + weight_t.powi(2) * sd_t.powi(2)
        + 2.0 * weight_s * weight_t * sd_s * sd_t * stats.correlation
}

/// Portfolio standard deviation.
///
/// With ρ = -1 the variance can come out a hair below zero; it is floored at 0.
/// A NaN variance stays NaN.
pub fn portfolio_std_dev(weights: WeightPair, stats: &PairStatistics) -> f64 {
    let variance = portfolio_variance(weights, stats);
    if variance < 0.0 {
        0.0
    } else {
        variance.sqrt()
    }
}

/// Evaluate each grid point, preserving input order.
pub fn evaluate_grid(points: &[GridPoint], stats: &PairStatistics) -> Vec<PortfolioRow> {
    points
        .iter()
        .map(|point| PortfolioRow {
            label: point.label.to_string(),
            weights: point.weights,
            expected_return: portfolio_return(point.weights, stats),
            std_dev: portfolio_std_dev(point.weights, stats),
        })
        .collect()
}

/// Evaluate the six canonical mixes.
pub fn evaluate_canonical_grid(stats: &PairStatistics) -> Vec<PortfolioRow> {
    evaluate_grid(&CANONICAL_WEIGHTS, stats)
}

//! Diversification benefit of the grid versus single-asset holdings.

use super::grid::CANONICAL_WEIGHTS;
use crate::types::{DiversificationResult, PortfolioRow};

/// Find the lowest-risk grid row and how much risk it removes relative to
/// holding only S (`sd_s`) or only T (`sd_t`).
///
/// The grid includes both pure holdings, so both reductions are non-negative
/// whenever `rows` came from the canonical grid. An empty grid falls back to
/// the lower single-asset risk.
pub fn analyze_diversification(rows: &[PortfolioRow], sd_s: f64, sd_t: f64) -> DiversificationResult {
    let min_row = rows
        .iter()
        .min_by(|a, b| a.std_dev.total_cmp(&b.std_dev));

    let (min_risk, min_risk_label) = match min_row {
        Some(row) => (row.std_dev, row.label.clone()),
        None if sd_s <= sd_t => (sd_s, CANONICAL_WEIGHTS[0].label.to_string()),
        None => (sd_t, CANONICAL_WEIGHTS[5].label.to_string()),
    };

    DiversificationResult {
        min_risk,
        min_risk_label,
        risk_reduction_vs_s: sd_s - min_risk,
        risk_reduction_vs_t: sd_t - min_risk,
    }
}

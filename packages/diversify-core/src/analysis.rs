//! The analysis pipeline: clean → statistics → grid → diversification.

use serde::{Deserialize, Serialize};

use crate::portfolio::{analyze_diversification, evaluate_canonical_grid};
use crate::returns::RawReturns;
use crate::stats::PairStatistics;
use crate::types::{AssetStats, DiversificationResult, PortfolioRow, ReturnPair};
use crate::Result;

/// Statistics for securities S and T.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AssetStatsPair {
    #[serde(rename = "S")]
    pub s: AssetStats,
    #[serde(rename = "T")]
    pub t: AssetStats,
}

/// Full result of one analysis run. All values are unrounded fractions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Analysis {
    /// Number of complete rows used
    pub observations: usize,
    pub asset_stats: AssetStatsPair,
    pub correlation: f64,
    /// Six rows, all-S first and all-T last
    pub grid: Vec<PortfolioRow>,
    pub diversification: DiversificationResult,
}

/// Analyse percent returns with blanks allowed.
///
/// Incomplete rows are dropped and values divided by 100 before any statistic
/// is computed.
pub fn analyze(input: &RawReturns) -> Result<Analysis> {
    let pair = input.clean()?;
    analyze_pair(&pair)
}

/// Analyse an already-clean pair of fractional returns.
pub fn analyze_pair(pair: &ReturnPair) -> Result<Analysis> {
    let stats = PairStatistics::from_pair(pair)?;
    tracing::debug!(
        observations = pair.len(),
        correlation = stats.correlation,
        "computed pair statistics"
    );

    let grid = evaluate_canonical_grid(&stats);
    let diversification = analyze_diversification(&grid, stats.s.std_dev, stats.t.std_dev);
    tracing::debug!(
        min_risk = diversification.min_risk,
        portfolio = %diversification.min_risk_label,
        "evaluated portfolio grid"
    );

    Ok(Analysis {
        observations: pair.len(),
        asset_stats: AssetStatsPair {
            s: stats.s,
            t: stats.t,
        },
        correlation: stats.correlation,
        grid,
        diversification,
    })
}

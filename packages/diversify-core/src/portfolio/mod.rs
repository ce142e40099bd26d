//! Two-asset portfolio evaluation.
//!
//! Sweeps the fixed weight grid from 100% S to 100% T and measures how far
//! mixing lowers risk below either security held alone.

mod diversification;
mod grid;

pub use diversification::analyze_diversification;
pub use grid::{
    evaluate_canonical_grid, evaluate_grid, portfolio_return, portfolio_std_dev,
    portfolio_variance, GridPoint, CANONICAL_WEIGHTS,
};

//! Diversify Core - two-asset portfolio diversification statistics.
//!
//! Given two series of periodic returns, this crate computes:
//!
//! - **Asset statistics**: mean and population standard deviation per security
//! - **Correlation**: Pearson coefficient between the two series
//! - **Portfolio grid**: expected return and risk of six S/T weight mixes
//! - **Diversification benefit**: lowest grid risk and the reduction versus
//!   holding either security alone
//!
//! Presentation (percent tables, SVG plot, HTML report) lives in [`report`].
//!
//! # Example
//!
//! ```rust
//! use diversify_core::{analyze, InputSource};
//!
//! let analysis = analyze(&InputSource::Reference.resolve()).unwrap();
//! assert_eq!(analysis.grid.len(), 6);
//! println!("Minimum risk: {:.4}", analysis.diversification.min_risk);
//! ```

pub mod analysis;
pub mod config;
pub mod datasets;
pub mod portfolio;
pub mod report;
pub mod returns;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use types::{
    ApiResponse, AssetStats, DiversificationResult, PortfolioRow, ReturnPair, ReturnSeries,
    WeightPair,
};

// Re-export main functionality
pub use analysis::{analyze, analyze_pair, Analysis, AssetStatsPair};
pub use config::ReportConfig;
pub use datasets::{builtin_datasets, InputSource, SourceKind};
pub use portfolio::{analyze_diversification, evaluate_canonical_grid, CANONICAL_WEIGHTS};
pub use returns::{clean_percent_rows, RawReturns};
pub use stats::{correlation, PairStatistics};

/// Error types for diversify-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Correlation undefined: {0}")]
    UndefinedCorrelation(String),

    #[error("Column length mismatch: S has {s} rows, T has {t}")]
    LengthMismatch { s: usize, t: usize },

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for diversify-core operations.
pub type Result<T> = std::result::Result<T, Error>;

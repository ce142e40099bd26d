//! Core data types for the diversification engine.
//!
//! All numeric fields are fractional returns (0.066 for 6.6%) and are never
//! rounded; formatting is left to [`crate::report`].

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Ordered periodic returns for one asset, as fractions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ReturnSeries(Vec<f64>);

impl ReturnSeries {
    /// Wrap a vector of fractional returns, rejecting non-finite values and
    /// series shorter than two periods.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.len() < 2 {
            return Err(Error::InsufficientData(format!(
                "a return series needs at least 2 values, got {}",
                values.len()
            )));
        }
        if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "non-finite return at period {}",
                idx
            )));
        }
        Ok(Self(values))
    }

    /// Returns as a slice.
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the series holds no periods.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<f64>> for ReturnSeries {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<ReturnSeries> for Vec<f64> {
    fn from(series: ReturnSeries) -> Self {
        series.0
    }
}

/// Two index-aligned return series for securities S and T.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "PairColumns")]
pub struct ReturnPair {
    s: ReturnSeries,
    t: ReturnSeries,
}

impl ReturnPair {
    /// Build a pair from fractional returns.
    ///
    /// Both columns must have the same length, at least 2 rows and only finite values.
    pub fn new(s: Vec<f64>, t: Vec<f64>) -> Result<Self> {
        if s.len() != t.len() {
            return Err(Error::LengthMismatch {
                s: s.len(),
                t: t.len(),
            });
        }
        Ok(Self {
            s: ReturnSeries::new(s)?,
            t: ReturnSeries::new(t)?,
        })
    }

    /// Returns of security S.
    pub fn s(&self) -> &ReturnSeries {
        &self.s
    }

    /// Returns of security T.
    pub fn t(&self) -> &ReturnSeries {
        &self.t
    }

    /// Number of aligned periods.
    pub fn len(&self) -> usize {
        self.s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.s.is_empty()
    }
}

// Unchecked wire form; deserialization goes through `ReturnPair::new`.
#[derive(Deserialize)]
struct PairColumns {
    s: Vec<f64>,
    t: Vec<f64>,
}

impl TryFrom<PairColumns> for ReturnPair {
    type Error = Error;

    fn try_from(columns: PairColumns) -> Result<Self> {
        Self::new(columns.s, columns.t)
    }
}

/// Mean and population standard deviation of one asset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AssetStats {
    /// Arithmetic mean return
    pub mean: f64,
    /// Population standard deviation (divides by N)
    pub std_dev: f64,
}

/// Allocation between S and T. Both weights lie in [0, 1] and sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightPair {
    pub weight_s: f64,
    pub weight_t: f64,
}

impl WeightPair {
    const SUM_TOLERANCE: f64 = 1e-9;

    /// Validated constructor for caller-supplied weights.
    pub fn new(weight_s: f64, weight_t: f64) -> Result<Self> {
        let in_range = |w: f64| (0.0..=1.0).contains(&w);
        if !in_range(weight_s) || !in_range(weight_t) {
            return Err(Error::InvalidWeights(format!(
                "weights must lie in [0, 1], got ({}, {})",
                weight_s, weight_t
            )));
        }
        if (weight_s + weight_t - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(Error::InvalidWeights(format!(
                "weights must sum to 1, got {}",
                weight_s + weight_t
            )));
        }
        Ok(Self { weight_s, weight_t })
    }

    /// Unchecked constructor for the built-in grid constants.
    pub(crate) const fn fixed(weight_s: f64, weight_t: f64) -> Self {
        Self { weight_s, weight_t }
    }
}

/// One row of the portfolio grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioRow {
    /// Display label, e.g. "B (60/40)"
    pub label: String,
    pub weights: WeightPair,
    /// Weighted mean return
    pub expected_return: f64,
    /// Two-asset portfolio standard deviation
    pub std_dev: f64,
}

/// How much mixing the two assets lowers risk below holding either alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiversificationResult {
    /// Lowest standard deviation across the grid
    pub min_risk: f64,
    /// Label of the grid row with the lowest risk
    pub min_risk_label: String,
    /// S standard deviation minus `min_risk`
    pub risk_reduction_vs_s: f64,
    /// T standard deviation minus `min_risk`
    pub risk_reduction_vs_t: f64,
}

/// API response wrapper used for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_pair_new() {
        let pair = ReturnPair::new(vec![0.01, 0.02, 0.03], vec![0.05, 0.04, 0.03]).unwrap();
        assert_eq!(pair.len(), 3);
        assert_eq!(pair.s().values(), &[0.01, 0.02, 0.03]);
        assert_eq!(pair.t().values(), &[0.05, 0.04, 0.03]);
    }

    #[test]
    fn test_return_pair_length_mismatch() {
        let result = ReturnPair::new(vec![0.01, 0.02, 0.03], vec![0.05, 0.04]);
        assert!(matches!(result, Err(Error::LengthMismatch { s: 3, t: 2 })));
    }

    #[test]
    fn test_return_series_too_short() {
        let result = ReturnSeries::new(vec![0.01]);
        assert!(matches!(result, Err(Error::InsufficientData(_))));
    }

    #[test]
    fn test_return_series_rejects_nan() {
        let result = ReturnSeries::new(vec![0.01, f64::NAN, 0.02]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_return_pair_deserialize_round_trip() {
        let pair = ReturnPair::new(vec![0.1, 0.2, 0.3], vec![0.3, 0.1, 0.2]).unwrap();
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, r#"{"s":[0.1,0.2,0.3],"t":[0.3,0.1,0.2]}"#);

        let parsed: ReturnPair = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pair);
    }

    #[test]
    fn test_return_pair_deserialize_enforces_invariants() {
        let ragged = serde_json::from_str::<ReturnPair>(r#"{"s":[0.1,0.2,0.3],"t":[0.1,0.3]}"#);
        assert!(ragged.is_err());

        let empty = serde_json::from_str::<ReturnPair>(r#"{"s":[],"t":[]}"#);
        assert!(empty.is_err());

        let short = serde_json::from_str::<ReturnSeries>("[0.1]");
        assert!(short.is_err());
    }

    #[test]
    fn test_weight_pair_validation() {
        assert!(WeightPair::new(0.7, 0.3).is_ok());
        assert!(matches!(
            WeightPair::new(0.7, 0.4),
            Err(Error::InvalidWeights(_))
        ));
        assert!(matches!(
            WeightPair::new(1.2, -0.2),
            Err(Error::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_api_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test".to_string());
        assert!(response.ok);
        assert_eq!(response.data, Some("test".to_string()));

        let err_response: ApiResponse<String> = ApiResponse::err("error");
        assert!(!err_response.ok);
        assert_eq!(err_response.error, Some("error".to_string()));
    }
}

//! Raw percent input and row-wise cleaning into a [`ReturnPair`].

use serde::{Deserialize, Serialize};

use crate::types::ReturnPair;
use crate::{Error, Result};

/// Two percent-return columns as entered by a user, with blanks allowed.
///
/// JSON form: `{"s": [6.6, null, -9.0], "t": [24.5, -5.9, null]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawReturns {
    pub s: Vec<Option<f64>>,
    pub t: Vec<Option<f64>>,
}

impl RawReturns {
    /// Build from fully populated percent columns.
    pub fn from_percent(s: &[f64], t: &[f64]) -> Self {
        Self {
            s: s.iter().copied().map(Some).collect(),
            t: t.iter().copied().map(Some).collect(),
        }
    }

    /// Parse two comma-separated columns. An empty field is a missing value.
    pub fn from_csv_columns(s: &str, t: &str) -> Result<Self> {
        Ok(Self {
            s: parse_column(s)?,
            t: parse_column(t)?,
        })
    }

    /// Parse the JSON form.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Drop incomplete rows and convert to fractions.
    pub fn clean(&self) -> Result<ReturnPair> {
        clean_percent_rows(&self.s, &self.t)
    }
}

fn parse_column(text: &str) -> Result<Vec<Option<f64>>> {
    text.split(',')
        .map(str::trim)
        .map(|field| {
            if field.is_empty() {
                Ok(None)
            } else {
                field
                    .trim_end_matches('%')
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| Error::InvalidInput(format!("not a number: {:?}", field)))
            }
        })
        .collect()
}

/// Remove every row with a missing value in either column, then divide by 100.
///
/// NaN and infinite entries count as missing. Fails with
/// [`Error::InsufficientData`] when fewer than two complete rows remain.
pub fn clean_percent_rows(s: &[Option<f64>], t: &[Option<f64>]) -> Result<ReturnPair> {
    if s.len() != t.len() {
        return Err(Error::LengthMismatch {
            s: s.len(),
            t: t.len(),
        });
    }

    let present = |v: &Option<f64>| (*v).filter(|x| x.is_finite());

    let (clean_s, clean_t): (Vec<f64>, Vec<f64>) = s
        .iter()
        .zip(t)
        .filter_map(|(a, b)| Some((present(a)? / 100.0, present(b)? / 100.0)))
        .unzip();

    let dropped = s.len() - clean_s.len();
    if dropped > 0 {
        tracing::debug!(dropped, kept = clean_s.len(), "dropped incomplete return rows");
    }

    if clean_s.len() < 2 {
        return Err(Error::InsufficientData(format!(
            "need at least 2 complete rows, found {}",
            clean_s.len()
        )));
    }

    ReturnPair::new(clean_s, clean_t)
}

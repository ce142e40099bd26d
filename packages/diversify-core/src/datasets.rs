//! Built-in datasets and the input-source selector.

use serde::{Deserialize, Serialize};

use crate::returns::RawReturns;

/// Watson & Head (2023), *Corporate Finance: Principles and Practice*, 8th ed.:
/// five years of annual returns (%) for security S.
pub const REFERENCE_S: [f64; 5] = [6.6, 5.6, -9.0, 12.6, 14.0];
/// Watson & Head (2023) returns (%) for security T.
pub const REFERENCE_T: [f64; 5] = [24.5, -5.9, 19.9, -7.8, 14.8];

/// Simplified classroom example (%), two gently rising series.
pub const SIMPLIFIED_S: [f64; 5] = [5.96, 6.50, 7.20, 7.80, 8.00];
pub const SIMPLIFIED_T: [f64; 5] = [9.10, 8.70, 10.00, 9.20, 9.40];

/// Where the analysed returns come from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    Reference,
    Simplified,
    UserSupplied(RawReturns),
}

impl InputSource {
    /// Percent columns for this source.
    pub fn resolve(&self) -> RawReturns {
        match self {
            Self::Reference => RawReturns::from_percent(&REFERENCE_S, &REFERENCE_T),
            Self::Simplified => RawReturns::from_percent(&SIMPLIFIED_S, &SIMPLIFIED_T),
            Self::UserSupplied(raw) => raw.clone(),
        }
    }

    /// Short identifier used in CLI output and config.
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Reference => SourceKind::Reference,
            Self::Simplified => SourceKind::Simplified,
            Self::UserSupplied(_) => SourceKind::User,
        }
    }
}

/// Data-free discriminant of [`InputSource`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SourceKind {
    #[default]
    Reference,
    Simplified,
    User,
}

/// A named built-in dataset.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub id: SourceKind,
    pub name: &'static str,
    pub s: &'static [f64],
    pub t: &'static [f64],
}

/// Built-in datasets.
pub fn builtin_datasets() -> Vec<Dataset> {
    vec![
        Dataset {
            id: SourceKind::Reference,
            name: "Watson & Head (2023) test data",
            s: &REFERENCE_S,
            t: &REFERENCE_T,
        },
        Dataset {
            id: SourceKind::Simplified,
            name: "Simplified example data",
            s: &SIMPLIFIED_S,
            t: &SIMPLIFIED_T,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_reference() {
        let raw = InputSource::Reference.resolve();
        assert_eq!(raw.s.len(), 5);
        assert_eq!(raw.s[2], Some(-9.0));
        assert_eq!(raw.t[0], Some(24.5));
    }

    #[test]
    fn test_resolve_user_supplied() {
        let user = RawReturns {
            s: vec![Some(1.0), None],
            t: vec![Some(2.0), Some(3.0)],
        };
        let source = InputSource::UserSupplied(user.clone());
        assert_eq!(source.resolve(), user);
        assert_eq!(source.kind(), SourceKind::User);
    }

    #[test]
    fn test_builtin_datasets() {
        let datasets = builtin_datasets();
        assert_eq!(datasets.len(), 2);
        assert!(datasets.iter().all(|d| d.s.len() == d.t.len()));
    }

    #[test]
    fn test_source_kind_serde() {
        let json = serde_json::to_string(&SourceKind::Simplified).unwrap();
        assert_eq!(json, "\"simplified\"");
        let parsed: SourceKind = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, SourceKind::User);
    }
}

//! Percent formatting and plain-text tables.

use std::fmt::Write;

use crate::analysis::Analysis;

/// Fraction to percentage points (0.066 → 6.6).
pub fn to_percent(fraction: f64) -> f64 {
    fraction * 100.0
}

/// Format a fraction as a percent string, e.g. `0.0596` → `"5.96%"`.
pub fn format_percent(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, to_percent(fraction))
}

/// Format a correlation coefficient, e.g. `"-0.39"`.
pub fn format_correlation(r: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, r)
}

/// Summary statistics table: mean and standard deviation per security.
pub fn summary_table(analysis: &Analysis, decimals: usize) -> String {
    let rows = [
        ("S", analysis.asset_stats.s),
        ("T", analysis.asset_stats.t),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "{:<6}{:>14}{:>22}", "", "Mean Return", "Standard Deviation");
    for (name, stats) in rows {
        let _ = writeln!(
            out,
            "{:<6}{:>14}{:>22}",
            name,
            format_percent(stats.mean, decimals),
            format_percent(stats.std_dev, decimals)
        );
    }
    let _ = writeln!(
        out,
        "Correlation (r): {}",
        format_correlation(analysis.correlation, decimals)
    );
    out
}

/// Portfolio risk and return table, one line per grid row.
pub fn portfolio_table(analysis: &Analysis, decimals: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16}{:>18}{:>26}",
        "Portfolio", "Mean Return (%)", "Standard Deviation (%)"
    );
    for row in &analysis.grid {
        let _ = writeln!(
            out,
            "{:<16}{:>18}{:>26}",
            row.label,
            format_percent(row.expected_return, decimals),
            format_percent(row.std_dev, decimals)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::datasets::InputSource;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.066, 2), "6.60%");
        assert_eq!(format_percent(-0.09, 1), "-9.0%");
        assert_eq!(format_percent(0.0596, 2), "5.96%");
    }

    #[test]
    fn test_format_correlation() {
        assert_eq!(format_correlation(-0.3891584, 2), "-0.39");
        assert_eq!(format_correlation(1.0, 2), "1.00");
    }

    #[test]
    fn test_percent_round_trip_matches_display() {
        let analysis = analyze(&InputSource::Reference.resolve()).unwrap();

        for row in &analysis.grid {
            let shown = format_percent(row.std_dev, 2);
            let parsed: f64 = shown.trim_end_matches('%').parse().unwrap();
            assert!((parsed - to_percent(row.std_dev)).abs() <= 0.005 + 1e-12);
            assert_eq!(format!("{:.2}", to_percent(row.std_dev)), format!("{:.2}", parsed));
        }
    }

    #[test]
    fn test_portfolio_table_lists_rows_in_order() {
        let analysis = analyze(&InputSource::Reference.resolve()).unwrap();
        let table = portfolio_table(&analysis, 2);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("All S (100/0)"));
        assert!(lines[3].contains("7.22%"));
        assert!(lines[3].contains("5.68%"));
        assert!(lines[6].starts_with("All T (0/100)"));
    }

    #[test]
    fn test_summary_table() {
        let analysis = analyze(&InputSource::Reference.resolve()).unwrap();
        let table = summary_table(&analysis, 2);

        assert!(table.contains("5.96%"));
        assert!(table.contains("13.39%"));
        assert!(table.contains("Correlation (r): -0.39"));
    }
}

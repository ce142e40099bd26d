//! One-page HTML report.

use std::fmt::Write;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use super::format::{format_correlation, format_percent};
use super::plot::risk_return_svg;
use crate::analysis::Analysis;
use crate::config::ReportConfig;
use crate::Result;

const STYLE: &str = "body{font-family:Arial,sans-serif;max-width:760px;margin:24px auto;color:#222}\
table{border-collapse:collapse;margin:8px 0 16px}\
th,td{border:1px solid #ccc;padding:4px 12px;text-align:right}\
th:first-child,td:first-child{text-align:left}\
.note{background:#eef5fb;padding:8px 12px;border-radius:4px}";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render the report as a complete HTML document.
pub fn render_report(analysis: &Analysis, config: &ReportConfig, generated_at: DateTime<Utc>) -> String {
    let d = config.decimals;
    let s = &analysis.asset_stats.s;
    let t = &analysis.asset_stats.t;
    let div = &analysis.diversification;

    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title><style>{STYLE}</style></head><body>",
        title = escape(&config.title)
    );
    let _ = write!(
        html,
        "<h1>{}</h1><p>Generated {} from {} observations.</p>",
        escape(&config.title),
        generated_at.format("%Y-%m-%d %H:%M UTC"),
        analysis.observations
    );

    html.push_str("<h2>Summary Statistics</h2><table><tr><th></th><th>Mean Return</th><th>Standard Deviation</th></tr>");
    for (name, stats) in [("S", s), ("T", t)] {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            name,
            format_percent(stats.mean, d),
            format_percent(stats.std_dev, d)
        );
    }
    let _ = write!(
        html,
        "</table><p>Correlation (r): <strong>{}</strong></p>",
        format_correlation(analysis.correlation, d)
    );

    html.push_str("<h2>Portfolio Risk and Return</h2><table><tr><th>Portfolio</th><th>Mean Return (%)</th><th>Standard Deviation (%)</th></tr>");
    for row in &analysis.grid {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&row.label),
            format_percent(row.expected_return, d),
            format_percent(row.std_dev, d)
        );
    }
    html.push_str("</table>");

    html.push_str("<h2>Risk and Return</h2>");
    html.push_str(&risk_return_svg(&analysis.grid));

    let _ = write!(
        html,
        "<h2>Diversification Benefit</h2>\
         <p>Security S risk reduced by <strong>{}</strong>; security T risk reduced by <strong>{}</strong>.</p>\
         <p class=\"note\">Minimum portfolio risk: <strong>{}</strong> ({}), compared to S ({}) and T ({}).</p>",
        format_percent(div.risk_reduction_vs_s, d),
        format_percent(div.risk_reduction_vs_t, d),
        format_percent(div.min_risk, d),
        escape(&div.min_risk_label),
        format_percent(s.std_dev, d),
        format_percent(t.std_dev, d)
    );

    html.push_str("</body></html>\n");
    html
}

/// Render the report and write it to `path`, creating parent directories.
pub fn write_report(analysis: &Analysis, config: &ReportConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let html = render_report(analysis, config, Utc::now());
    fs::write(path, html)?;
    tracing::info!(path = %path.display(), "wrote report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::datasets::InputSource;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn reference_analysis() -> Analysis {
        analyze(&InputSource::Reference.resolve()).unwrap()
    }

    #[test]
    fn test_render_report_sections() {
        let config = ReportConfig::default();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let html = render_report(&reference_analysis(), &config, at);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Generated 2024-03-01 09:30 UTC"));
        assert!(html.contains("<td>S</td><td>5.96%</td><td>8.16%</td>"));
        assert!(html.contains("Correlation (r): <strong>-0.39</strong>"));
        assert!(html.contains("<td>B (60/40)</td><td>7.22%</td><td>5.68%</td>"));
        assert!(html.contains("Minimum portfolio risk: <strong>5.68%</strong> (B (60/40))"));
        assert_eq!(html.matches("<svg").count(), 1);
    }

    #[test]
    fn test_render_report_respects_decimals() {
        let config = ReportConfig {
            decimals: 1,
            ..ReportConfig::default()
        };
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let html = render_report(&reference_analysis(), &config, at);

        assert!(html.contains("<td>S</td><td>6.0%</td><td>8.2%</td>"));
    }

    #[test]
    fn test_write_report_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/report.html");

        write_report(&reference_analysis(), &ReportConfig::default(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Diversification Benefit"));
    }
}

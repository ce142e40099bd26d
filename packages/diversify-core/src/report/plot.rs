//! Risk/return scatter rendered as standalone SVG.

use std::fmt::Write;

use crate::types::PortfolioRow;

const WIDTH: f64 = 560.0;
const HEIGHT: f64 = 400.0;
const PADDING: f64 = 56.0;
const GRID_LINES: usize = 5;
const LINE_COLOR: &str = "#348dc1";
const GRID_COLOR: &str = "#e0e0e0";

/// Min/max of `values` widened by 5% on each side so points never sit on the
/// frame. A flat range is widened by one percentage point.
fn padded_extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    if span <= f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    (lo - span * 0.05, hi + span * 0.05)
}

fn scale(value: f64, min_v: f64, max_v: f64, from: f64, to: f64) -> f64 {
    from + (value - min_v) / (max_v - min_v) * (to - from)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Plot the grid with risk (std dev %) on x and expected return (%) on y.
///
/// Points are joined in grid order and annotated with their row label.
pub fn risk_return_svg(rows: &[PortfolioRow]) -> String {
    let xs: Vec<f64> = rows.iter().map(|r| r.std_dev * 100.0).collect();
    let ys: Vec<f64> = rows.iter().map(|r| r.expected_return * 100.0).collect();
    let (x_min, x_max) = padded_extent(xs.iter().copied());
    let (y_min, y_max) = padded_extent(ys.iter().copied());

    let (left, right) = (PADDING, WIDTH - PADDING / 2.0);
    let (top, bottom) = (PADDING / 2.0, HEIGHT - PADDING);
    let px = |x: f64| scale(x, x_min, x_max, left, right);
    let py = |y: f64| scale(y, y_min, y_max, bottom, top);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}"><style>text{{font-family:Arial,sans-serif;font-size:10px;fill:#444}}</style>"#
    );

    for i in 0..=GRID_LINES {
        let frac = i as f64 / GRID_LINES as f64;
        let xv = x_min + (x_max - x_min) * frac;
        let yv = y_min + (y_max - y_min) * frac;
        let (gx, gy) = (px(xv), py(yv));
        let _ = write!(
            svg,
            r#"<line x1="{gx:.2}" y1="{top:.2}" x2="{gx:.2}" y2="{bottom:.2}" stroke="{GRID_COLOR}" stroke-width="1" />"#
        );
        let _ = write!(
            svg,
            r#"<line x1="{left:.2}" y1="{gy:.2}" x2="{right:.2}" y2="{gy:.2}" stroke="{GRID_COLOR}" stroke-width="1" />"#
        );
        let _ = write!(
            svg,
            r#"<text x="{gx:.2}" y="{:.2}" text-anchor="middle">{xv:.1}</text>"#,
            bottom + 14.0
        );
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{gy:.2}" text-anchor="end" dy="3">{yv:.1}</text>"#,
            left - 6.0
        );
    }

    let points = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| format!("{:.2},{:.2}", px(*x), py(*y)))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = write!(
        svg,
        r#"<polyline fill="none" stroke="{LINE_COLOR}" stroke-width="1.5" points="{points}" />"#
    );

    for ((x, y), row) in xs.iter().zip(&ys).zip(rows) {
        let (cx, cy) = (px(*x), py(*y));
        let _ = write!(
            svg,
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="3.5" fill="{LINE_COLOR}" />"#
        );
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-size="8">{}</text>"#,
            cx + 5.0,
            cy - 5.0,
            escape(&row.label)
        );
    }

    let _ = write!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">Risk (Standard Deviation %)</text>"#,
        (left + right) / 2.0,
        HEIGHT - 14.0
    );
    let _ = write!(
        svg,
        r#"<text x="14" y="{:.2}" text-anchor="middle" transform="rotate(-90 14 {:.2})">Expected Return (%)</text>"#,
        (top + bottom) / 2.0,
        (top + bottom) / 2.0
    );
    svg.push_str("</svg>");
    svg
}

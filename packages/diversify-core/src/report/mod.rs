//! Presentation helpers: percent formatting, text tables, SVG plot and the
//! one-page HTML report.
//!
//! Nothing here feeds back into the engine; rounding happens only on output.

mod format;
mod html;
mod plot;

pub use format::{
    format_correlation, format_percent, portfolio_table, summary_table, to_percent,
};
pub use html::{render_report, write_report};
pub use plot::risk_return_svg;

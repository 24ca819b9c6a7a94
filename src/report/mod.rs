//! PDF report generation
//!
//! [`render`] builds a [`ReportLayout`] for one person and renders it to
//! PDF bytes. High-risk reports carry a recommendations section; low-risk
//! reports do not.

mod layout;
mod pdf;

pub use layout::{wrap, Block, ReportLayout, Rgb, FACTORS_TEXT, REPORT_TITLE};
pub use pdf::{render_layout, render_pdf, RenderedPdf};

use crate::data::FeatureVector;
use crate::error::Result;
use crate::inference::{Identity, RiskLevel};

/// Download file name for the report
pub const REPORT_FILENAME: &str = "heart_report.pdf";

pub const REPORT_MIME: &str = "application/pdf";

/// Build and render a report
pub fn render(identity: &Identity, features: &FeatureVector, risk: RiskLevel) -> Result<Vec<u8>> {
    render_layout(&ReportLayout::build(identity, features, risk))
}

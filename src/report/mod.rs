//! Paginated PDF rendering of assistant output.
//!
//! Free-form text is classified line by line, wrapped to the usable page
//! width and laid out top to bottom across as many pages as it needs. The
//! layout is computed first as plain data so the page-break decisions can be
//! inspected without parsing PDF bytes; [`render_pdf`] then draws it.

pub mod classify;
pub mod fonts;
pub mod layout;
pub mod render;

use serde::Deserialize;
use thiserror::Error;

use crate::telemetry::metrics::REPORT_PAGES;

pub use layout::layout;
pub use render::render_pdf;

pub const REPORT_FILE_NAME: &str = "healthcare_report.pdf";
pub const REPORT_MIME: &str = "application/pdf";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("PDF rendering failed: {0}")]
    Render(String),
}

/// Page size and margin in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// US Letter with a 50pt margin.
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin: 50.0,
        }
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        let values = [self.width, self.height, self.margin];
        if values.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(ReportError::InvalidGeometry(format!(
                "width, height and margin must be positive, got {}x{} margin {}",
                self.width, self.height, self.margin
            )));
        }
        if self.width <= 2.0 * self.margin || self.height <= 2.0 * self.margin {
            return Err(ReportError::InvalidGeometry(format!(
                "margin {} leaves no room on a {}x{} page",
                self.margin, self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn usable_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn top(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

/// Lays out `text` on pages of the given geometry and returns the PDF bytes.
#[tracing::instrument(
    name = "report render",
    skip(text),
    fields(report.chars = text.len(), report.pages, report.bytes)
)]
pub fn render_report(text: &str, geometry: PageGeometry) -> Result<Vec<u8>, ReportError> {
    let document = layout(text, geometry)?;
    let bytes = render_pdf(&document)?;

    let span = tracing::Span::current();
    span.record("report.pages", document.pages.len() as u64);
    span.record("report.bytes", bytes.len() as u64);
    REPORT_PAGES.record(document.pages.len() as f64, &[]);

    Ok(bytes)
}

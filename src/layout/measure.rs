//! Text measurement collaborator.
//!
//! Offsets are only collision-free when widths come from the same font the
//! render sink draws with, so measurement is a capability the caller
//! supplies. `MonospaceMeasure` covers terminals, tests, and any sink with a
//! fixed-width font.

use unicode_width::UnicodeWidthStr;

use crate::error::MeasureError;

/// Measures the rendered width of a label, once per node per layout pass.
pub trait TextMeasure {
    fn width(&self, text: &str) -> Result<f64, MeasureError>;
}

/// Display-cell measurement for fixed-width fonts.
#[derive(Debug, Clone)]
pub struct MonospaceMeasure {
    /// Pixels per display cell.
    pub cell_width: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { cell_width: 8.0 }
    }
}

impl MonospaceMeasure {
    pub fn new(cell_width: f64) -> Self {
        Self { cell_width }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn width(&self, text: &str) -> Result<f64, MeasureError> {
        Ok(UnicodeWidthStr::width(text) as f64 * self.cell_width)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

//! Font data: reading compiled fonts, importing SVG outlines, writing UFOs

pub mod font_file;
pub mod format;
pub mod outline;
pub mod svg_import;
pub mod ufo;

pub use font_file::{FontFile, FontFileError};
pub use format::OutputFormat;

/// Vertical metrics of a new font, in font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmMetrics {
    pub units_per_em: f64,
    pub ascender: f64,
    /// Negative, below the baseline.
    pub descender: f64,
}

impl Default for EmMetrics {
    fn default() -> Self {
        Self {
            units_per_em: 1000.0,
            ascender: 800.0,
            descender: -200.0,
        }
    }
}

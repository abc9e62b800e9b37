//! Console reporting helpers shared by every command
//!
//! Codepoint lists, durations, the glyph progress bar and colored status
//! lines all live here so each tool prints the same way.

pub mod codepoints;
pub mod console;
pub mod progress;
pub mod time;

pub use codepoints::{format_codepoint, format_codepoints, glyph_label};
pub use progress::ProgressTracker;
pub use time::format_duration;

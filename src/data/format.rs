//! Output font formats and their generation profiles

use crate::engine::GenerateFlag;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Font formats the engine can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Ttf,
    Otf,
    Woff,
    #[default]
    Woff2,
    Eot,
    Svg,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::Ttf,
        OutputFormat::Otf,
        OutputFormat::Woff,
        OutputFormat::Woff2,
        OutputFormat::Eot,
        OutputFormat::Svg,
    ];

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Ttf => "ttf",
            OutputFormat::Otf => "otf",
            OutputFormat::Woff => "woff",
            OutputFormat::Woff2 => "woff2",
            OutputFormat::Eot => "eot",
            OutputFormat::Svg => "svg",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OutputFormat::Ttf => "TrueType font (.ttf)",
            OutputFormat::Otf => "OpenType font (.otf)",
            OutputFormat::Woff => "Web Open Font Format (.woff)",
            OutputFormat::Woff2 => "Web Open Font Format 2 (.woff2)",
            OutputFormat::Eot => "Embedded OpenType (.eot)",
            OutputFormat::Svg => "SVG font (.svg)",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(extension))
    }

    /// Generation flags for this format, `None` meaning the engine defaults.
    ///
    /// OpenType output keeps Apple tables and a dummy DSIG; TrueType adds a
    /// short `post` table and the old-style `kern` table; WOFF2 drops hints,
    /// flex and instructions to compress as far as possible.
    pub fn generate_flags(self) -> Option<Vec<GenerateFlag>> {
        use GenerateFlag::*;
        match self {
            OutputFormat::Otf => Some(vec![Opentype, Round, DummyDsig, Apple]),
            OutputFormat::Ttf => Some(vec![
                Opentype, Round, DummyDsig, Apple, ShortPost, OldKern,
            ]),
            OutputFormat::Woff2 => Some(vec![
                Opentype,
                Round,
                DummyDsig,
                NoFlex,
                NoHints,
                ShortPost,
                OmitInstructions,
            ]),
            OutputFormat::Woff | OutputFormat::Eot | OutputFormat::Svg => None,
        }
    }

    /// `input` with its extension replaced by this format's.
    pub fn default_output_path(self, input: &Path) -> PathBuf {
        input.with_extension(self.extension())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

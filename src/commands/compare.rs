//! Shared pieces of the `cmap-diff` and `diff` commands

use crate::data::font_file::{self, FontFile};
use crate::report::{console, format_codepoints};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub old_font: PathBuf,
    pub new_font: PathBuf,
    /// Print JSON instead of the human readable report.
    pub json: bool,
}

/// Codepoints gained and lost between two revisions of a font.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CodepointDiff {
    pub old_count: usize,
    pub new_count: usize,
    pub added: BTreeSet<u32>,
    pub removed: BTreeSet<u32>,
}

impl CodepointDiff {
    pub fn between(old: &BTreeSet<u32>, new: &BTreeSet<u32>) -> Self {
        Self {
            old_count: old.len(),
            new_count: new.len(),
            added: new.difference(old).copied().collect(),
            removed: old.difference(new).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Open both fonts, checking the old one first so the error names the
/// file that is missing.
pub fn open_pair(options: &CompareOptions) -> Result<(FontFile, FontFile)> {
    for (label, path) in [("Old", &options.old_font), ("New", &options.new_font)] {
        if !path.exists() {
            bail!("{} font file '{}' does not exist", label, path.display());
        }
    }
    let old = FontFile::open(&options.old_font).context("Failed to load the old font")?;
    let new = FontFile::open(&options.new_font).context("Failed to load the new font")?;
    Ok((old, new))
}

/// Codepoints of one font, logging progress. A font without a cmap table
/// contributes no codepoints and a warning.
pub fn extract_codepoints(
    face: &ttf_parser::Face<'_>,
    label: &str,
    source: &str,
    warnings: &mut Vec<String>,
) -> BTreeSet<u32> {
    info!("Extracting Unicode codepoints from the {} font...", label);
    let codepoints = font_file::codepoints(face).unwrap_or_else(|| {
        let message = format!("Font '{}' has no 'cmap' table", source);
        warn!("{}", message);
        warnings.push(message);
        BTreeSet::new()
    });
    info!("The {} font has {} Unicode codepoints", label, codepoints.len());
    codepoints
}

pub fn render_header(options: &CompareOptions) -> String {
    let mut out = String::new();
    let rule = console::heavy_rule();
    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "Comparing font files:");
    let _ = writeln!(out, "  Old font: {}", options.old_font.display());
    let _ = writeln!(out, "  New font: {}", options.new_font.display());
    let _ = writeln!(out, "{rule}\n");
    out
}

/// A titled block with the count and formatted list of `codepoints`.
pub fn render_set(title: &str, codepoints: &BTreeSet<u32>) -> String {
    format!(
        "{title}:\n  Count: {}\n  List: {}\n\n",
        codepoints.len(),
        format_codepoints(codepoints)
    )
}

pub fn render_codepoint_diff(diff: &CodepointDiff) -> String {
    let mut out = String::new();
    out.push_str(&render_set("Added Unicode codepoints", &diff.added));
    out.push_str(&render_set("Removed Unicode codepoints", &diff.removed));
    out
}

/// Print the closing verdict framed by heavy rules.
pub fn print_conclusion(identical: bool, identical_message: &str, done_message: &str) {
    println!("{}", console::heavy_rule());
    if identical {
        console::success(identical_message);
    } else {
        console::success(done_message);
    }
    println!("{}\n", console::heavy_rule());
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

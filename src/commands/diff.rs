//! `fontsmith diff`: coverage, outline and metric changes between two fonts

use crate::commands::compare::{self, CodepointDiff, CompareOptions};
use crate::data::font_file;
use crate::data::outline::record_outline;
use crate::report::{console, format_codepoint};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::warn;
use ttf_parser::{Face, GlyphId};

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FontDiff {
    #[serde(flatten)]
    pub codepoints: CodepointDiff,
    /// Common codepoints whose glyph outlines differ.
    pub changed_outlines: BTreeSet<u32>,
    /// Common codepoints whose advance width or left side bearing differ.
    pub changed_metrics: BTreeSet<u32>,
    pub outlines_compared: bool,
    pub metrics_compared: bool,
    pub warnings: Vec<String>,
}

impl FontDiff {
    pub fn is_empty(&self) -> bool {
        self.codepoints.is_empty()
            && self.changed_outlines.is_empty()
            && self.changed_metrics.is_empty()
    }

    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }
}

/// Compare two parsed fonts. Labels only feed log and warning text.
pub fn compare_faces(old: &Face<'_>, new: &Face<'_>, old_label: &str, new_label: &str) -> FontDiff {
    let mut diff = FontDiff::default();
    let old_codepoints = compare::extract_codepoints(old, "old", old_label, &mut diff.warnings);
    let new_codepoints = compare::extract_codepoints(new, "new", new_label, &mut diff.warnings);
    diff.codepoints = CodepointDiff::between(&old_codepoints, &new_codepoints);

    // Codepoints outside either font's preferred subtable are not compared.
    let old_map = font_file::best_mapping(old);
    let new_map = font_file::best_mapping(new);
    let mut pairs: Vec<(u32, GlyphId, GlyphId)> = Vec::new();
    for &cp in old_codepoints.intersection(&new_codepoints) {
        let (Some(&old_gid), Some(&new_gid)) = (old_map.get(&cp), new_map.get(&cp)) else {
            continue;
        };
        if old_gid.0 >= old.number_of_glyphs() || new_gid.0 >= new.number_of_glyphs() {
            diff.warn(format!(
                "{} maps to a glyph beyond the font's glyph count; skipping",
                format_codepoint(cp)
            ));
            continue;
        }
        pairs.push((cp, old_gid, new_gid));
    }

    if font_file::has_outlines(old) && font_file::has_outlines(new) {
        diff.outlines_compared = true;
        for &(cp, old_gid, new_gid) in &pairs {
            match (record_outline(old, old_gid), record_outline(new, new_gid)) {
                (Ok(before), Ok(after)) => {
                    if before != after {
                        diff.changed_outlines.insert(cp);
                    }
                }
                (Err(e), _) | (_, Err(e)) => diff.warn(format!(
                    "Cannot read outline data for {}: {}; skipping",
                    format_codepoint(cp),
                    e
                )),
            }
        }
    } else {
        diff.warn("One of the fonts has no 'glyf' or 'CFF ' table; skipping outline comparison".to_string());
    }

    if font_file::has_horizontal_metrics(old) && font_file::has_horizontal_metrics(new) {
        diff.metrics_compared = true;
        for &(cp, old_gid, new_gid) in &pairs {
            match (
                font_file::horizontal_metrics(old, old_gid),
                font_file::horizontal_metrics(new, new_gid),
            ) {
                (Some(before), Some(after)) => {
                    if before != after {
                        diff.changed_metrics.insert(cp);
                    }
                }
                _ => diff.warn(format!(
                    "Cannot read horizontal metrics for {}; skipping",
                    format_codepoint(cp)
                )),
            }
        }
    } else {
        diff.warn("One of the fonts has no 'hmtx' table; skipping metrics comparison".to_string());
    }

    diff
}

pub fn run(options: &CompareOptions) -> Result<FontDiff> {
    if !options.json {
        print!("{}", compare::render_header(options));
    }

    let (old, new) = compare::open_pair(options)?;
    let diff = compare_faces(
        &old.face()?,
        &new.face()?,
        &old.path().display().to_string(),
        &new.path().display().to_string(),
    );

    if options.json {
        compare::print_json(&diff)?;
        return Ok(diff);
    }

    console::section("Analyzing codepoint differences...");
    print!("{}", compare::render_codepoint_diff(&diff.codepoints));

    if diff.outlines_compared {
        console::section("Analyzing glyph outline differences...");
        print!(
            "{}",
            compare::render_set("Codepoints with changed outlines", &diff.changed_outlines)
        );
    }
    if diff.metrics_compared {
        console::section("Analyzing glyph metric differences...");
        print!(
            "{}",
            compare::render_set("Codepoints with changed metrics", &diff.changed_metrics)
        );
    }

    compare::print_conclusion(
        diff.is_empty(),
        "Both fonts are identical in coverage, outlines and metrics.",
        "Font difference analysis complete.",
    );
    Ok(diff)
}

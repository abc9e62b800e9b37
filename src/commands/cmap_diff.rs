//! `fontsmith cmap-diff`: codepoints added and removed between two fonts

use crate::commands::compare::{self, CodepointDiff, CompareOptions};
use crate::report::console;
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CmapReport {
    #[serde(flatten)]
    pub codepoints: CodepointDiff,
    pub warnings: Vec<String>,
}

pub fn run(options: &CompareOptions) -> Result<CmapReport> {
    if !options.json {
        print!("{}", compare::render_header(options));
    }

    let (old, new) = compare::open_pair(options)?;
    let (old_face, new_face) = (old.face()?, new.face()?);

    let mut warnings = Vec::new();
    let old_codepoints = compare::extract_codepoints(
        &old_face,
        "old",
        &old.path().display().to_string(),
        &mut warnings,
    );
    let new_codepoints = compare::extract_codepoints(
        &new_face,
        "new",
        &new.path().display().to_string(),
        &mut warnings,
    );
    let report = CmapReport {
        codepoints: CodepointDiff::between(&old_codepoints, &new_codepoints),
        warnings,
    };

    if options.json {
        compare::print_json(&report)?;
        return Ok(report);
    }

    console::section("Analyzing codepoint differences...");
    print!("{}", compare::render_codepoint_diff(&report.codepoints));
    for warning in &report.warnings {
        console::warning(format!("Warning: {warning}"));
    }
    compare::print_conclusion(
        report.codepoints.is_empty(),
        "The 'cmap' tables of both fonts are identical; no codepoint differences found.",
        "Codepoint difference analysis complete.",
    );
    Ok(report)
}

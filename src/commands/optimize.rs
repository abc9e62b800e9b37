//! `fontsmith optimize`: outline cleanup over every glyph of a font
//!
//! The engine runs the same pipeline on each glyph: decompose references,
//! a light simplification that pins near-axis segments as corners, then
//! stronger simplification passes around overlap removal and direction fixes,
//! and a final tidy-up pass that rounds widths and coordinates and rehints.
//! The strength of the main passes is the user's simplify value.

use crate::engine::{
    EngineEvent, EngineJob, FontEngine, GenerateFlag, GenerateTarget, GlyphErrorPolicy, GlyphOp,
    SimplifyFlag, SimplifyParams,
};
use crate::report::{console, format_duration, glyph_label, ProgressTracker};
use anyhow::{bail, Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

pub const DEFAULT_SIMPLIFY: f64 = 0.5;
pub const DEFAULT_SUFFIX: &str = "_merge_glyphs";

/// Segments shorter than this along either axis become corners.
const NEAR_AXIS_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    pub font_file: PathBuf,
    pub simplify: f64,
    /// Appended to the input file stem to name the output.
    pub suffix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplifyMode {
    Conservative,
    Balanced,
    Aggressive,
}

impl SimplifyMode {
    pub fn classify(simplify: f64) -> Self {
        if simplify < 1.0 {
            SimplifyMode::Conservative
        } else if simplify < 2.0 {
            SimplifyMode::Balanced
        } else {
            SimplifyMode::Aggressive
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SimplifyMode::Conservative => "keeps detail, smallest outline changes",
            SimplifyMode::Balanced => "balances file size against fidelity",
            SimplifyMode::Aggressive => "smallest files, may lose fine detail",
        }
    }
}

impl fmt::Display for SimplifyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SimplifyMode::Conservative => "conservative",
            SimplifyMode::Balanced => "balanced",
            SimplifyMode::Aggressive => "aggressive",
        })
    }
}

/// Printed when `optimize` is run without a font.
pub fn usage_guide() -> String {
    let mut out = String::from("Usage: fontsmith optimize <FONT_FILE> [-s SIMPLIFY]\n\n");
    out.push_str("Simplify modes:\n");
    for (range, mode) in [
        ("0.5-1.0", SimplifyMode::Conservative),
        ("1.0-2.0", SimplifyMode::Balanced),
        ("2.0-3.0", SimplifyMode::Aggressive),
    ] {
        out.push_str(&format!("  {range}  {mode}: {}\n", mode.description()));
    }
    out.push_str(&format!(
        "\nThe default is {DEFAULT_SIMPLIFY}. The result is written next to the input as <name>{DEFAULT_SUFFIX}.<ext>.\n\n"
    ));
    out.push_str("Examples:\n");
    out.push_str("  fontsmith optimize MyFont.ttf\n");
    out.push_str("  fontsmith optimize MyFont.ttf -s 1.5\n");
    out
}

/// The per-glyph operations for simplify value `s`, in order.
pub fn pipeline(s: f64) -> Vec<GlyphOp> {
    use SimplifyFlag::*;
    vec![
        GlyphOp::UnlinkReferences,
        SimplifyParams::new()
            .error_bound(0.1)
            .flags([MergeLines, ChooseHv])
            .bounds(0.1, 0.1, 0.0)
            .into_op(),
        GlyphOp::CornerNearAxisSegments {
            tolerance: NEAR_AXIS_TOLERANCE,
        },
        SimplifyParams::new()
            .error_bound(s)
            .flags([MergeLines, SmoothCurves, RemoveSingletonPoints])
            .bounds(0.3, 0.0, 0.5)
            .into_op(),
        GlyphOp::CanonicalContours,
        GlyphOp::CanonicalStart,
        GlyphOp::RemoveOverlap,
        GlyphOp::CorrectDirection,
        SimplifyParams::new()
            .error_bound(s)
            .flags([MergeLines, SmoothCurves])
            .bounds(0.3, 0.0, 0.5)
            .into_op(),
        GlyphOp::Round,
        GlyphOp::AutoHint,
        // Tidy-up pass
        SimplifyParams::new()
            .error_bound(0.5)
            .flags([MergeLines, SmoothCurves, ChooseHv, RemoveSingletonPoints])
            .bounds(0.3, 0.0, 0.5)
            .into_op(),
        GlyphOp::RoundWidth { step: 10 },
        GlyphOp::Balance,
        GlyphOp::AutoHint,
        SimplifyParams::new()
            .error_bound(1.0)
            .flags([SetStartToExtremum, RemoveSingletonPoints, ForceLines])
            .into_op(),
        GlyphOp::Cluster { within: 0.5 },
        GlyphOp::RemoveOverlap,
        SimplifyParams::new().error_bound(1.0).into_op(),
        GlyphOp::Round,
    ]
}

/// `<stem><suffix>.<ext>` in the input's directory.
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    input.with_file_name(name)
}

/// Glyph counts of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeSummary {
    pub output: PathBuf,
    pub glyphs: usize,
    pub optimized: usize,
    pub failed: usize,
}

pub async fn run(engine: &impl FontEngine, options: &OptimizeOptions) -> Result<OptimizeSummary> {
    if !options.font_file.exists() {
        bail!("Font file '{}' does not exist", options.font_file.display());
    }
    if !options.simplify.is_finite() || options.simplify <= 0.0 {
        bail!("Simplify value must be a positive number, got {}", options.simplify);
    }

    let mode = SimplifyMode::classify(options.simplify);
    info!(
        "Simplify value {} ({} mode: {})",
        options.simplify,
        mode,
        mode.description()
    );

    let output = output_path(&options.font_file, &options.suffix);
    let job = EngineJob::new(
        &options.font_file,
        GenerateTarget::new(
            &output,
            Some(vec![
                GenerateFlag::Opentype,
                GenerateFlag::Round,
                GenerateFlag::DummyDsig,
                GenerateFlag::Apple,
            ]),
        ),
    )
    .with_glyph_ops(pipeline(options.simplify))
    .on_glyph_error(GlyphErrorPolicy::Skip)
    .require_glyphs();

    let start = Instant::now();
    let mut tracker: Option<ProgressTracker> = None;
    let outcome = engine
        .run(&job, &mut |event: &EngineEvent| match event {
            EngineEvent::Loaded { glyphs } if *glyphs > 0 => {
                tracker = Some(ProgressTracker::new(*glyphs));
            }
            EngineEvent::Glyph {
                index,
                name,
                unicode,
            } => {
                let label = glyph_label(name, *unicode);
                debug!("Optimizing {}", label);
                if let Some(tracker) = tracker.as_mut() {
                    tracker.update(*index, &label);
                }
            }
            EngineEvent::GlyphError {
                name,
                unicode,
                message,
            } => warn!("Error processing {}: {}", glyph_label(name, *unicode), message),
            EngineEvent::Warning { message } => warn!("{}", message),
            _ => {}
        })
        .await
        .context("Optimization failed")?;

    if outcome.glyphs == 0 {
        console::warning("The font has no glyphs to optimize");
        bail!("No glyphs in '{}'", options.font_file.display());
    }
    if let Some(tracker) = tracker.as_mut() {
        tracker.complete();
    }
    let generated = outcome
        .generated
        .clone()
        .with_context(|| format!("The engine did not write {}", output.display()))?;

    let summary = OptimizeSummary {
        output: generated,
        glyphs: outcome.glyphs,
        optimized: outcome.succeeded(),
        failed: outcome.glyph_errors,
    };
    println!();
    console::success(format!("Optimized font saved to {}", summary.output.display()));
    println!(
        "Glyphs optimized: {}/{} ({} failed) in {}",
        summary.optimized,
        summary.glyphs,
        summary.failed,
        format_duration(start.elapsed())
    );
    Ok(summary)
}

//! `fontsmith merge-svg`: build a font from a directory of glyph SVGs
//!
//! Each file holds one glyph and is named after its codepoint (`u0041.svg`).
//! The glyphs are collected into a UFO in a scratch directory, then the engine
//! cleans up every outline and writes the requested font format.

use crate::data::svg_import::{import_svg_outline, parse_codepoint_filename};
use crate::data::ufo::{self, InsertedGlyph, UfoNames};
use crate::data::{EmMetrics, OutputFormat};
use crate::engine::{
    EngineEvent, EngineJob, FontEngine, GenerateTarget, GlyphErrorPolicy, GlyphOp, SimplifyParams,
};
use crate::report::{console, glyph_label};
use anyhow::{bail, Context, Result};
use norad::Font;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct MergeSvgOptions {
    pub input_dir: PathBuf,
    /// The output format follows this file's extension.
    pub output_font: PathBuf,
    pub font_name: String,
}

/// Counts reported at the end of a merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeSummary {
    pub output: PathBuf,
    /// SVG files turned into glyphs.
    pub processed: usize,
    /// Files that could not be imported or were superseded by a later file
    /// for the same codepoint, plus glyphs the engine failed on.
    pub errors: usize,
}

/// `*.svg` files directly inside `dir`, sorted by file name.
pub fn svg_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
        })
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

pub fn copyright_notice(now: chrono::DateTime<chrono::Local>) -> String {
    format!(
        "Created by fontsmith merge-svg at {}",
        now.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Import one SVG file into `font`.
fn import_file(font: &mut Font, path: &Path, metrics: &EmMetrics) -> Result<InsertedGlyph> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("{}: file name is not valid UTF-8", path.display()))?;
    let codepoint = parse_codepoint_filename(file_name)?;
    let svg = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let outline = import_svg_outline(&svg, metrics)
        .with_context(|| format!("Failed to import {}", file_name))?;
    Ok(ufo::insert_glyph(font, codepoint, outline))
}

/// Build the UFO from every SVG in `files`. Returns the font and the
/// number of files that failed. Two files naming the same codepoint keep
/// the later one and count the earlier as failed.
pub fn build_font(files: &[PathBuf], names: &UfoNames, metrics: &EmMetrics) -> (Font, usize) {
    let mut font = ufo::new_font(names, metrics);
    let mut errors = 0;
    for path in files {
        match import_file(&mut font, path, metrics) {
            Ok(glyph) if glyph.replaced => {
                console::warning(format!(
                    "{} replaces the glyph {} imported from an earlier file",
                    path.display(),
                    glyph.name
                ));
                errors += 1;
            }
            Ok(glyph) => debug!("Imported {} as {}", path.display(), glyph.name),
            Err(e) => {
                console::warning(format!("Skipping {}: {:#}", path.display(), e));
                errors += 1;
            }
        }
    }
    (font, errors)
}

/// Per-glyph cleanup applied by the engine before generating.
pub fn cleanup_ops() -> Vec<GlyphOp> {
    vec![
        GlyphOp::RemoveOverlap,
        SimplifyParams::new().into_op(),
        GlyphOp::Round,
    ]
}

pub async fn run(engine: &impl FontEngine, options: &MergeSvgOptions) -> Result<MergeSummary> {
    if !options.input_dir.is_dir() {
        bail!(
            "Input directory '{}' does not exist",
            options.input_dir.display()
        );
    }

    let extension = options
        .output_font
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    if OutputFormat::from_extension(extension).is_none() {
        warn!(
            "'{}' is not a known output extension; the engine decides the format",
            extension
        );
    }

    let files = svg_files(&options.input_dir)?;
    info!(
        "Found {} SVG files in {}",
        files.len(),
        options.input_dir.display()
    );

    let names = UfoNames {
        family_name: options.font_name.clone(),
        copyright: Some(copyright_notice(chrono::Local::now())),
    };
    let metrics = EmMetrics::default();
    let (font, import_errors) = build_font(&files, &names, &metrics);
    let imported = font.default_layer().len();

    let workdir = tempfile::tempdir()?;
    let ufo_path = workdir
        .path()
        .join(format!("{}.ufo", options.font_name.replace(' ', "")));
    ufo::save_font(&font, &ufo_path)?;

    let job = EngineJob::new(&ufo_path, GenerateTarget::new(&options.output_font, None))
        .with_glyph_ops(cleanup_ops())
        .on_glyph_error(GlyphErrorPolicy::Skip);
    let outcome = engine
        .run(&job, &mut |event: &EngineEvent| match event {
            EngineEvent::GlyphError {
                name,
                unicode,
                message,
            } => warn!("Error processing {}: {}", glyph_label(name, *unicode), message),
            EngineEvent::Warning { message } => warn!("{}", message),
            _ => {}
        })
        .await
        .context("Failed to generate the merged font")?;
    let generated = outcome
        .generated
        .with_context(|| format!("The engine did not write {}", options.output_font.display()))?;

    let summary = MergeSummary {
        output: generated,
        processed: imported.saturating_sub(outcome.glyph_errors),
        errors: import_errors + outcome.glyph_errors,
    };

    println!();
    console::success(format!("Font saved to {}", summary.output.display()));
    println!("Glyphs processed: {}", summary.processed);
    println!("Errors: {}", summary.errors);
    Ok(summary)
}

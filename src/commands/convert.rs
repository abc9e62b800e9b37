//! `fontsmith convert`: re-encode a font in another format
//!
//! Besides picking generation flags for the target format, conversion tunes
//! the font for screen rendering: it marks the font as ClearType-ready, makes
//! the OS/2 and hhea vertical metrics agree and installs a `gasp` table that
//! asks for grid-fitting and smoothing at every size.

use crate::data::OutputFormat;
use crate::engine::{
    EngineEvent, EngineJob, FontEngine, FontOp, GaspFlag, GaspRange, GenerateTarget,
};
use crate::report::console;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// `gasp` range limits; 65535 covers every larger size.
pub const GASP_PPEMS: [u16; 3] = [8, 16, 65535];

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    /// Defaults to the input path with the format's extension.
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub family_name: Option<String>,
    pub version: Option<String>,
}

impl ConvertOptions {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.format.default_output_path(&self.input))
    }
}

fn gasp_ranges() -> Vec<GaspRange> {
    GASP_PPEMS
        .into_iter()
        .map(|ppem| GaspRange {
            ppem,
            flags: vec![
                GaspFlag::Gridfit,
                GaspFlag::Antialias,
                GaspFlag::SymmetricSmoothing,
            ],
        })
        .collect()
}

/// The engine job converting `options.input` to `output`.
pub fn build_job(options: &ConvertOptions, output: &Path) -> EngineJob {
    let mut font_ops = Vec::new();
    if let Some(family) = &options.family_name {
        font_ops.push(FontOp::names_from_family(family));
    }
    if let Some(version) = &options.version {
        font_ops.push(FontOp::SetVersion {
            version: version.clone(),
        });
    }
    font_ops.push(FontOp::OptimizeForCleartype);
    font_ops.push(FontOp::SyncVerticalMetrics);
    font_ops.push(FontOp::SetGasp {
        ranges: gasp_ranges(),
    });

    EngineJob::new(
        &options.input,
        GenerateTarget::new(output, options.format.generate_flags()),
    )
    .with_font_ops(font_ops)
}

/// File sizes before and after a conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeReport {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub elapsed: Duration,
}

fn kilobytes(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

impl SizeReport {
    /// Relative size change in percent, `None` for an empty input.
    pub fn change_percent(&self) -> Option<f64> {
        if self.input_bytes == 0 {
            return None;
        }
        Some((self.output_bytes as f64 - self.input_bytes as f64) / self.input_bytes as f64 * 100.0)
    }

    pub fn render(&self) -> String {
        let change = match self.change_percent() {
            Some(percent) => format!("{percent:+.1}%"),
            None => "n/a".to_string(),
        };
        format!(
            "Processing time: {:.2}s\nInput size: {}\nOutput size: {}\nSize change: {}\n",
            self.elapsed.as_secs_f64(),
            kilobytes(self.input_bytes),
            kilobytes(self.output_bytes),
            change
        )
    }
}

pub async fn run(engine: &impl FontEngine, options: &ConvertOptions) -> Result<SizeReport> {
    if !options.input.exists() {
        bail!("Input file '{}' does not exist", options.input.display());
    }
    let output = options.output_path();
    if output == options.input {
        bail!(
            "Output path '{}' is the input file; pass --output to choose another",
            output.display()
        );
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    info!(
        "Converting {} to {} ({})",
        options.input.display(),
        output.display(),
        options.format.description()
    );
    let job = build_job(options, &output);
    let start = Instant::now();
    let outcome = engine
        .run(&job, &mut |event: &EngineEvent| {
            if let EngineEvent::Warning { message } = event {
                warn!("{}", message);
            }
        })
        .await
        .context("Font conversion failed")?;
    let elapsed = start.elapsed();

    let generated = outcome
        .generated
        .with_context(|| format!("The engine did not write {}", output.display()))?;

    let input_bytes = fs::metadata(&options.input)?.len();
    let output_bytes = fs::metadata(&generated)
        .with_context(|| format!("Failed to read {}", generated.display()))?
        .len();
    let report = SizeReport {
        input_bytes,
        output_bytes,
        elapsed,
    };

    print!("\n{}", report.render());
    console::success(format!(
        "Converted {} to {}",
        options.input.display(),
        output.display()
    ));
    Ok(report)
}

/// Text printed by `--list-formats`.
pub fn format_list() -> String {
    let mut out = String::from("Supported output formats:\n");
    for format in OutputFormat::ALL {
        let marker = if format == OutputFormat::default() {
            " (default)"
        } else {
            ""
        };
        out.push_str(&format!(
            "  {:<6} {}{}\n",
            format.extension(),
            format.description(),
            marker
        ));
    }
    out
}

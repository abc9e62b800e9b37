//! Serializable description of one engine run

use serde::Serialize;
use std::path::{Path, PathBuf};

/// One engine run: open a font, apply font-level operations, run the glyph
/// operations over every glyph in order, then generate the output file.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EngineJob {
    pub source: PathBuf,
    pub font_ops: Vec<FontOp>,
    pub glyph_ops: Vec<GlyphOp>,
    pub on_glyph_error: GlyphErrorPolicy,
    /// Stop without generating when the font has no glyphs.
    pub require_glyphs: bool,
    pub output: GenerateTarget,
}

impl EngineJob {
    pub fn new(source: impl Into<PathBuf>, output: GenerateTarget) -> Self {
        Self {
            source: source.into(),
            font_ops: Vec::new(),
            glyph_ops: Vec::new(),
            on_glyph_error: GlyphErrorPolicy::Skip,
            require_glyphs: false,
            output,
        }
    }

    pub fn with_font_ops(mut self, ops: impl IntoIterator<Item = FontOp>) -> Self {
        self.font_ops.extend(ops);
        self
    }

    pub fn with_glyph_ops(mut self, ops: impl IntoIterator<Item = GlyphOp>) -> Self {
        self.glyph_ops.extend(ops);
        self
    }

    pub fn require_glyphs(mut self) -> Self {
        self.require_glyphs = true;
        self
    }

    pub fn on_glyph_error(mut self, policy: GlyphErrorPolicy) -> Self {
        self.on_glyph_error = policy;
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GlyphErrorPolicy {
    /// Report the failure as an event and continue with the next glyph.
    Skip,
    /// Fail the whole job.
    Abort,
}

/// Where and how the engine writes its result.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerateTarget {
    pub path: PathBuf,
    /// `None` leaves flag selection to the engine.
    pub flags: Option<Vec<GenerateFlag>>,
}

impl GenerateTarget {
    pub fn new(path: impl AsRef<Path>, flags: Option<Vec<GenerateFlag>>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            flags,
        }
    }
}

/// Flags understood by the engine's font generator.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum GenerateFlag {
    Opentype,
    Round,
    DummyDsig,
    Apple,
    ShortPost,
    OldKern,
    NoFlex,
    NoHints,
    OmitInstructions,
}

/// Font-level operations. A failing font operation is reported as a warning
/// and never stops the job.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FontOp {
    SetNames {
        family: String,
        fontname: String,
        fullname: String,
    },
    SetVersion {
        version: String,
    },
    /// Set the `head` flag telling rasterizers the font is tuned for ClearType.
    OptimizeForCleartype,
    /// Copy ascent/descent into the OS/2 typo and hhea metrics, zero line gaps.
    SyncVerticalMetrics,
    SetGasp {
        ranges: Vec<GaspRange>,
    },
}

impl FontOp {
    /// Family, full and PostScript names from one family name. The
    /// PostScript name is the family name with spaces removed.
    pub fn names_from_family(family: &str) -> Self {
        FontOp::SetNames {
            family: family.to_string(),
            fontname: family.replace(' ', ""),
            fullname: family.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GaspRange {
    pub ppem: u16,
    pub flags: Vec<GaspFlag>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GaspFlag {
    Gridfit,
    Antialias,
    SymmetricSmoothing,
}

/// Operations applied to every glyph, in order.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GlyphOp {
    /// Replace component references with their outlines.
    UnlinkReferences,
    Simplify(SimplifyParams),
    /// Make both end points of nearly horizontal or vertical segments corners.
    CornerNearAxisSegments {
        tolerance: f64,
    },
    CanonicalContours,
    CanonicalStart,
    RemoveOverlap,
    CorrectDirection,
    Round,
    AutoHint,
    /// Round the advance width to a multiple of `step`.
    RoundWidth {
        step: u32,
    },
    Balance,
    Cluster {
        within: f64,
    },
}

/// Arguments of the engine's simplify call. They are positional: the engine
/// receives every argument up to the last one that is set.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SimplifyParams {
    pub error_bound: Option<f64>,
    pub flags: Vec<SimplifyFlag>,
    pub tan_bounds: Option<f64>,
    pub linefixup: Option<f64>,
    pub linelenmax: Option<f64>,
}

impl SimplifyParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_bound(mut self, value: f64) -> Self {
        self.error_bound = Some(value);
        self
    }

    pub fn flags(mut self, flags: impl IntoIterator<Item = SimplifyFlag>) -> Self {
        self.flags = flags.into_iter().collect();
        self
    }

    /// Tangent bound, line fix-up distance and maximum line length.
    pub fn bounds(mut self, tan_bounds: f64, linefixup: f64, linelenmax: f64) -> Self {
        self.tan_bounds = Some(tan_bounds);
        self.linefixup = Some(linefixup);
        self.linelenmax = Some(linelenmax);
        self
    }

    pub fn into_op(self) -> GlyphOp {
        GlyphOp::Simplify(self)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SimplifyFlag {
    MergeLines,
    SmoothCurves,
    ChooseHv,
    RemoveSingletonPoints,
    SetStartToExtremum,
    ForceLines,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn names_strip_spaces_for_postscript() {
        let op = FontOp::names_from_family("Noto Sans CJK");
        assert_eq!(
            op,
            FontOp::SetNames {
                family: "Noto Sans CJK".into(),
                fontname: "NotoSansCJK".into(),
                fullname: "Noto Sans CJK".into(),
            }
        );
    }

    #[test]
    fn glyph_ops_serialize_with_op_tag() {
        let op = SimplifyParams::new()
            .error_bound(0.1)
            .flags([SimplifyFlag::MergeLines, SimplifyFlag::ChooseHv])
            .bounds(0.1, 0.1, 0.0)
            .into_op();
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "op": "simplify",
                "error_bound": 0.1,
                "flags": ["mergelines", "choosehv"],
                "tan_bounds": 0.1,
                "linefixup": 0.1,
                "linelenmax": 0.0,
            })
        );
        assert_eq!(
            serde_json::to_value(GlyphOp::RoundWidth { step: 10 }).unwrap(),
            json!({"op": "round_width", "step": 10})
        );
    }

    #[test]
    fn job_serializes_flags_and_policy() {
        let job = EngineJob::new(
            "in.ttf",
            GenerateTarget::new("out.otf", Some(vec![GenerateFlag::DummyDsig])),
        )
        .with_font_ops([FontOp::OptimizeForCleartype])
        .require_glyphs();
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["on_glyph_error"], "skip");
        assert_eq!(value["require_glyphs"], true);
        assert_eq!(value["output"]["flags"], json!(["dummy-dsig"]));
        assert_eq!(value["font_ops"], json!([{"op": "optimize_for_cleartype"}]));
    }

    #[test]
    fn default_generation_has_null_flags() {
        let target = GenerateTarget::new("out.svg", None);
        let value = serde_json::to_value(&target).unwrap();
        assert!(value["flags"].is_null());
    }
}

//! Recording glyph outlines for comparison

use thiserror::Error;
use ttf_parser::head::IndexToLocationFormat;
use ttf_parser::{Face, GlyphId, OutlineBuilder, Tag};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PenCommand {
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    QuadTo { x1: f32, y1: f32, x: f32, y: f32 },
    CurveTo { x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32 },
    Close,
}

/// Pen that keeps every drawing command in order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingPen {
    pub commands: Vec<PenCommand>,
}

impl RecordingPen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_commands(self) -> Vec<PenCommand> {
        self.commands
    }
}

impl OutlineBuilder for RecordingPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(PenCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(PenCommand::LineTo { x, y });
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.commands.push(PenCommand::QuadTo { x1, y1, x, y });
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.commands
            .push(PenCommand::CurveTo { x1, y1, x2, y2, x, y });
    }

    fn close(&mut self) {
        self.commands.push(PenCommand::Close);
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutlineError {
    #[error("outline data of glyph {0} could not be parsed")]
    Malformed(u16),
}

/// Drawing commands of `glyph`. A glyph without an outline records nothing;
/// a glyph whose outline data is present but unreadable is an error.
pub fn record_outline(face: &Face<'_>, glyph: GlyphId) -> Result<Vec<PenCommand>, OutlineError> {
    let mut pen = RecordingPen::new();
    if face.outline_glyph(glyph, &mut pen).is_some() {
        return Ok(pen.into_commands());
    }
    if !pen.commands.is_empty() || glyf_data_len(face, glyph).is_some_and(|len| len > 0) {
        return Err(OutlineError::Malformed(glyph.0));
    }
    Ok(Vec::new())
}

/// Length of the glyph's `glyf` record according to `loca`, `None` for
/// fonts without TrueType outlines.
fn glyf_data_len(face: &Face<'_>, glyph: GlyphId) -> Option<usize> {
    face.tables().glyf?;
    let loca = face.raw_face().table(Tag::from_bytes(b"loca"))?;
    let index = usize::from(glyph.0);
    let (start, end) = match face.tables().head.index_to_location_format {
        IndexToLocationFormat::Short => {
            let read = |i: usize| -> Option<usize> {
                let bytes = loca.get(i * 2..i * 2 + 2)?;
                Some(usize::from(u16::from_be_bytes([bytes[0], bytes[1]])) * 2)
            };
            (read(index)?, read(index + 1)?)
        }
        IndexToLocationFormat::Long => {
            let read = |i: usize| -> Option<usize> {
                let bytes = loca.get(i * 4..i * 4 + 4)?;
                usize::try_from(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])).ok()
            };
            (read(index)?, read(index + 1)?)
        }
    };
    Some(end.saturating_sub(start))
}

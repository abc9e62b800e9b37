//! Reading compiled fonts with ttf-parser

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use ttf_parser::{cmap, Face, GlyphId, PlatformId};

#[derive(Debug, Error)]
pub enum FontFileError {
    #[error("font file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ttf_parser::FaceParsingError,
    },
}

/// Unicode subtables in order of preference when mapping codepoints to
/// glyphs: full-repertoire subtables before BMP-only ones.
const PREFERRED_SUBTABLES: [(PlatformId, u16); 8] = [
    (PlatformId::Windows, 10),
    (PlatformId::Unicode, 6),
    (PlatformId::Unicode, 4),
    (PlatformId::Windows, 1),
    (PlatformId::Unicode, 3),
    (PlatformId::Unicode, 2),
    (PlatformId::Unicode, 1),
    (PlatformId::Unicode, 0),
];

/// A font file held in memory. Only the first face of a collection is read.
pub struct FontFile {
    path: PathBuf,
    data: Vec<u8>,
}

impl FontFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FontFileError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FontFileError::NotFound(path.to_path_buf()));
        }
        let data = std::fs::read(path).map_err(|source| FontFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Self {
            path: path.to_path_buf(),
            data,
        };
        font.face()?;
        Ok(font)
    }

    pub fn from_bytes(path: impl Into<PathBuf>, data: Vec<u8>) -> Result<Self, FontFileError> {
        let font = Self {
            path: path.into(),
            data,
        };
        font.face()?;
        Ok(font)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn face(&self) -> Result<Face<'_>, FontFileError> {
        Face::parse(&self.data, 0).map_err(|source| FontFileError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// Every codepoint listed by any cmap subtable, or `None` when the font has
/// no cmap table at all.
pub fn codepoints(face: &Face<'_>) -> Option<BTreeSet<u32>> {
    let cmap = face.tables().cmap?;
    let mut codepoints = BTreeSet::new();
    for subtable in cmap.subtables {
        subtable.codepoints(|cp| {
            codepoints.insert(cp);
        });
    }
    Some(codepoints)
}

/// The most complete Unicode subtable, following [`PREFERRED_SUBTABLES`].
fn best_subtable<'a>(face: &Face<'a>) -> Option<cmap::Subtable<'a>> {
    let cmap = face.tables().cmap?;
    PREFERRED_SUBTABLES.iter().find_map(|&(platform, encoding)| {
        cmap.subtables
            .into_iter()
            .find(|s| s.platform_id == platform && s.encoding_id == encoding)
    })
}

/// Codepoint to glyph mapping from the preferred Unicode subtable.
pub fn best_mapping(face: &Face<'_>) -> BTreeMap<u32, GlyphId> {
    let mut mapping = BTreeMap::new();
    if let Some(subtable) = best_subtable(face) {
        subtable.codepoints(|cp| {
            if let Some(glyph) = subtable.glyph_index(cp) {
                mapping.insert(cp, glyph);
            }
        });
    }
    mapping
}

/// Whether the font carries outlines in `glyf` or `CFF `.
pub fn has_outlines(face: &Face<'_>) -> bool {
    let tables = face.tables();
    tables.glyf.is_some() || tables.cff.is_some()
}

pub fn has_horizontal_metrics(face: &Face<'_>) -> bool {
    face.tables().hmtx.is_some()
}

/// Advance width and left side bearing of a glyph.
pub fn horizontal_metrics(face: &Face<'_>, glyph: GlyphId) -> Option<(u16, i16)> {
    let advance = face.glyph_hor_advance(glyph)?;
    let side_bearing = face.glyph_hor_side_bearing(glyph)?;
    Some((advance, side_bearing))
}

//! Building UFO fonts in memory with norad

use crate::data::svg_import::ImportedOutline;
use crate::data::EmMetrics;
use anyhow::{Context, Result};
use norad::{Font, Glyph};
use std::path::Path;

/// Font-wide naming for a new UFO.
#[derive(Debug, Clone)]
pub struct UfoNames {
    pub family_name: String,
    pub copyright: Option<String>,
}

/// Create an empty UFO with names and vertical metrics set.
///
/// Family, full and PostScript names all derive from `names.family_name`;
/// the PostScript name drops spaces.
pub fn new_font(names: &UfoNames, metrics: &EmMetrics) -> Font {
    let mut font = Font::new();
    let info = &mut font.font_info;
    info.family_name = Some(names.family_name.clone());
    info.style_name = Some("Regular".to_string());
    info.open_type_name_preferred_family_name = Some(names.family_name.clone());
    info.postscript_font_name = Some(names.family_name.replace(' ', ""));
    info.postscript_full_name = Some(names.family_name.clone());
    info.copyright = names.copyright.clone();
    if let Some(units_per_em) = norad::fontinfo::NonNegativeIntegerOrFloat::new(metrics.units_per_em)
    {
        info.units_per_em = Some(units_per_em);
    }
    info.ascender = Some(metrics.ascender);
    info.descender = Some(metrics.descender);
    font
}

/// Production name for a codepoint: `uniXXXX` inside the BMP, `uXXXXX`
/// beyond it.
pub fn glyph_name_for(codepoint: char) -> String {
    let value = codepoint as u32;
    if value <= 0xFFFF {
        format!("uni{value:04X}")
    } else {
        format!("u{value:05X}")
    }
}

/// Result of [`insert_glyph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedGlyph {
    pub name: String,
    /// A glyph of the same name was already in the layer and is gone now.
    pub replaced: bool,
}

/// Add the glyph for `codepoint` to the default layer, replacing any glyph
/// already stored under its name.
pub fn insert_glyph(font: &mut Font, codepoint: char, outline: ImportedOutline) -> InsertedGlyph {
    let name = glyph_name_for(codepoint);
    let replaced = font.default_layer().get_glyph(name.as_str()).is_some();
    let mut glyph = Glyph::new(&name);
    glyph.width = outline.advance_width;
    glyph.codepoints.insert(codepoint);
    glyph.contours = outline.contours;
    font.default_layer_mut().insert_glyph(glyph);
    InsertedGlyph { name, replaced }
}

pub fn save_font(font: &Font, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    font.save(path)
        .with_context(|| format!("Failed to write UFO to {}", path.display()))
}

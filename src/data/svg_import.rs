//! Importing single-glyph SVG files as UFO contours
//!
//! Every path in the document is flattened with its absolute transform, then
//! mapped into font units: the SVG height is scaled to the em square and the
//! y axis is flipped so the top of the SVG sits on the ascender line.

use crate::data::EmMetrics;
use kurbo::{Affine, BezPath, PathEl, Point};
use norad::{Contour, ContourPoint, PointType};
use thiserror::Error;
use usvg::tiny_skia_path::PathSegment;

#[derive(Debug, Error)]
pub enum SvgImportError {
    #[error("{0}: not an .svg file")]
    NotSvg(String),
    #[error("{0}: invalid Unicode value")]
    InvalidCodepoint(String),
    #[error("{name}: U+{value:04X} is not a Unicode scalar value")]
    NotAScalarValue { name: String, value: u32 },
    #[error("failed to parse SVG: {0}")]
    Parse(#[from] usvg::Error),
    #[error("SVG has zero width or height")]
    EmptyCanvas,
}

/// Outlines of one SVG file in font units.
#[derive(Debug, Clone)]
pub struct ImportedOutline {
    pub contours: Vec<Contour>,
    pub advance_width: f64,
}

/// Codepoint encoded in a glyph file name: hexadecimal digits with an
/// optional `uni`, `U+` or `u` prefix, e.g. `u4E00.svg`, `uni0041.svg`,
/// `U+1F600.svg` or `0041.svg`.
pub fn parse_codepoint_filename(file_name: &str) -> Result<char, SvgImportError> {
    let stem = file_name
        .len()
        .checked_sub(4)
        .filter(|&split| file_name.is_char_boundary(split))
        .filter(|&split| file_name[split..].eq_ignore_ascii_case(".svg"))
        .map(|split| &file_name[..split])
        .ok_or_else(|| SvgImportError::NotSvg(file_name.to_string()))?;

    let digits = ["uni", "U+", "u+", "u", "U"]
        .iter()
        .find_map(|prefix| stem.strip_prefix(prefix))
        .unwrap_or(stem);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SvgImportError::InvalidCodepoint(file_name.to_string()));
    }
    let value = u32::from_str_radix(digits, 16)
        .map_err(|_| SvgImportError::InvalidCodepoint(file_name.to_string()))?;
    char::from_u32(value).ok_or_else(|| SvgImportError::NotAScalarValue {
        name: file_name.to_string(),
        value,
    })
}

/// Parse an SVG document and return its outlines in font units.
pub fn import_svg_outline(svg: &str, metrics: &EmMetrics) -> Result<ImportedOutline, SvgImportError> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())?;
    let size = tree.size();
    if size.width() <= 0.0 || size.height() <= 0.0 {
        return Err(SvgImportError::EmptyCanvas);
    }

    let scale = metrics.units_per_em / f64::from(size.height());
    let to_font_units = Affine::new([scale, 0.0, 0.0, -scale, 0.0, metrics.ascender]);

    let mut paths = Vec::new();
    collect_paths(tree.root(), &mut paths);

    let contours = paths
        .into_iter()
        .flat_map(|path| bezpath_to_contours(&(to_font_units * path)))
        .collect();

    Ok(ImportedOutline {
        contours,
        advance_width: f64::from(size.width()) * scale,
    })
}

/// Gather every path below `group` in SVG user space with transforms applied.
fn collect_paths(group: &usvg::Group, out: &mut Vec<BezPath>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(group) => collect_paths(group, out),
            usvg::Node::Path(path) => out.push(to_bezpath(path.data(), path.abs_transform())),
            usvg::Node::Text(text) => collect_paths(text.flattened(), out),
            usvg::Node::Image(_) => {}
        }
    }
}

fn to_bezpath(data: &usvg::tiny_skia_path::Path, transform: usvg::Transform) -> BezPath {
    let affine = Affine::new([
        f64::from(transform.sx),
        f64::from(transform.ky),
        f64::from(transform.kx),
        f64::from(transform.sy),
        f64::from(transform.tx),
        f64::from(transform.ty),
    ]);
    let pt = |p: usvg::tiny_skia_path::Point| Point::new(f64::from(p.x), f64::from(p.y));

    let mut path = BezPath::new();
    for segment in data.segments() {
        match segment {
            PathSegment::MoveTo(p) => path.move_to(pt(p)),
            PathSegment::LineTo(p) => path.line_to(pt(p)),
            PathSegment::QuadTo(c, p) => path.quad_to(pt(c), pt(p)),
            PathSegment::CubicTo(c1, c2, p) => path.curve_to(pt(c1), pt(c2), pt(p)),
            PathSegment::Close => path.close_path(),
        }
    }
    affine * path
}

/// Convert a kurbo path to closed UFO contours.
///
/// Filled shapes are closed whether or not the path says so. When the last
/// on-curve point lands on the start point it is folded into the first point,
/// which takes over its segment type.
pub fn bezpath_to_contours(path: &BezPath) -> Vec<Contour> {
    let mut contours = Vec::new();
    let mut points: Vec<ContourPoint> = Vec::new();

    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => {
                finish_contour(&mut points, &mut contours);
                points.push(point(p, PointType::Line));
            }
            PathEl::LineTo(p) => points.push(point(p, PointType::Line)),
            PathEl::QuadTo(c, p) => {
                points.push(point(c, PointType::OffCurve));
                points.push(point(p, PointType::QCurve));
            }
            PathEl::CurveTo(c1, c2, p) => {
                points.push(point(c1, PointType::OffCurve));
                points.push(point(c2, PointType::OffCurve));
                points.push(point(p, PointType::Curve));
            }
            PathEl::ClosePath => finish_contour(&mut points, &mut contours),
        }
    }
    finish_contour(&mut points, &mut contours);
    contours
}

fn point(p: Point, typ: PointType) -> ContourPoint {
    ContourPoint::new(p.x, p.y, typ, false, None, None)
}

fn finish_contour(points: &mut Vec<ContourPoint>, contours: &mut Vec<Contour>) {
    if points.len() > 1 {
        let first = (points[0].x, points[0].y);
        if let Some(last) = points.last() {
            let closes_on_start = last.typ != PointType::OffCurve
                && (last.x - first.0).abs() < 1e-9
                && (last.y - first.1).abs() < 1e-9;
            if closes_on_start {
                let typ = last.typ.clone();
                points.pop();
                points[0].typ = typ;
            }
        }
        if points.len() > 1 {
            contours.push(Contour::new(std::mem::take(points), None));
        }
    }
    points.clear();
}

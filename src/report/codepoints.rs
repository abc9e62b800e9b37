//! Human readable codepoint lists

use std::collections::BTreeSet;

/// Lists longer than this are abbreviated to their head and tail.
const ABBREVIATE_ABOVE: usize = 20;
/// Number of entries kept at each end of an abbreviated list.
const KEEP_AT_EACH_END: usize = 10;

/// Format a single codepoint as `U+0041`.
pub fn format_codepoint(codepoint: u32) -> String {
    format!("U+{codepoint:04X}")
}

/// Format a set of codepoints for the console.
///
/// An empty set prints as `none`. Sets with more than twenty entries show the
/// first ten and last ten codepoints with the number of omitted entries in
/// between.
pub fn format_codepoints(codepoints: &BTreeSet<u32>) -> String {
    if codepoints.is_empty() {
        return "none".to_string();
    }

    let join = |items: &mut dyn Iterator<Item = &u32>| {
        items
            .map(|&cp| format_codepoint(cp))
            .collect::<Vec<_>>()
            .join(", ")
    };

    if codepoints.len() > ABBREVIATE_ABOVE {
        let omitted = codepoints.len() - 2 * KEEP_AT_EACH_END;
        let head = join(&mut codepoints.iter().take(KEEP_AT_EACH_END));
        let tail = join(&mut codepoints.iter().skip(codepoints.len() - KEEP_AT_EACH_END));
        format!("{head}, ... ({omitted} more), {tail}")
    } else {
        join(&mut codepoints.iter())
    }
}

/// Label for a glyph: its codepoint when it has one, otherwise its name.
pub fn glyph_label(name: &str, unicode: Option<u32>) -> String {
    match unicode {
        Some(cp) => format_codepoint(cp),
        None => name.to_string(),
    }
}

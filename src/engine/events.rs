//! Events reported by the engine while it runs a job
//!
//! The engine writes one JSON object per line on stdout. Lines that do not
//! parse as an event are engine chatter and are only logged.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// The source font is open and has `glyphs` glyphs.
    Loaded { glyphs: usize },
    /// Glyph number `index` (1-based) is about to be processed.
    Glyph {
        index: usize,
        name: String,
        unicode: Option<u32>,
    },
    GlyphError {
        name: String,
        unicode: Option<u32>,
        message: String,
    },
    Warning { message: String },
    Generated { path: PathBuf },
}

impl EngineEvent {
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('{') {
            return None;
        }
        serde_json::from_str(line).ok()
    }
}

/// Summary of a finished engine run, folded from its events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineOutcome {
    pub glyphs: usize,
    pub processed: usize,
    pub glyph_errors: usize,
    pub warnings: Vec<String>,
    pub generated: Option<PathBuf>,
}

impl EngineOutcome {
    pub fn record(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::Loaded { glyphs } => self.glyphs = *glyphs,
            EngineEvent::Glyph { .. } => self.processed += 1,
            EngineEvent::GlyphError { .. } => self.glyph_errors += 1,
            EngineEvent::Warning { message } => self.warnings.push(message.clone()),
            EngineEvent::Generated { path } => self.generated = Some(path.clone()),
        }
    }

    /// Glyphs that went through every operation without failing.
    pub fn succeeded(&self) -> usize {
        self.processed.saturating_sub(self.glyph_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_glyph_events() {
        let event =
            EngineEvent::parse_line(r#"{"event": "glyph", "index": 3, "name": "A", "unicode": 65}"#);
        assert_eq!(
            event,
            Some(EngineEvent::Glyph {
                index: 3,
                name: "A".into(),
                unicode: Some(65)
            })
        );
    }

    #[test]
    fn null_unicode_is_none() {
        let event = EngineEvent::parse_line(
            r#"{"event": "glyph_error", "name": ".notdef", "unicode": null, "message": "boom"}"#,
        );
        assert!(matches!(
            event,
            Some(EngineEvent::GlyphError { unicode: None, .. })
        ));
    }

    #[test]
    fn chatter_is_not_an_event() {
        assert_eq!(EngineEvent::parse_line("Copyright (c) 2000-2024"), None);
        assert_eq!(EngineEvent::parse_line("{not json"), None);
        assert_eq!(EngineEvent::parse_line(r#"{"event": "unknown"}"#), None);
    }

    #[test]
    fn outcome_counts_events() {
        let mut outcome = EngineOutcome::default();
        for event in [
            EngineEvent::Loaded { glyphs: 2 },
            EngineEvent::Glyph { index: 1, name: "a".into(), unicode: Some(0x61) },
            EngineEvent::Glyph { index: 2, name: "b".into(), unicode: Some(0x62) },
            EngineEvent::GlyphError { name: "b".into(), unicode: Some(0x62), message: "x".into() },
            EngineEvent::Warning { message: "gasp".into() },
            EngineEvent::Generated { path: "out.ttf".into() },
        ] {
            outcome.record(&event);
        }
        assert_eq!(outcome.glyphs, 2);
        assert_eq!(outcome.processed, 2);
        assert_eq!(outcome.succeeded(), 1);
        assert_eq!(outcome.warnings, vec!["gasp".to_string()]);
        assert_eq!(outcome.generated, Some(PathBuf::from("out.ttf")));
    }
}

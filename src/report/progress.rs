//! Single-line progress bar for per-glyph work
//!
//! The tracker redraws one carriage-return line at most every
//! [`REDRAW_INTERVAL`], showing a bar, the percentage, elapsed time, an
//! estimate of the remaining time and the glyph currently being processed.

use crate::report::time::format_duration;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::info;

pub const BAR_WIDTH: usize = 30;
pub const REDRAW_INTERVAL: Duration = Duration::from_millis(200);

pub struct ProgressTracker<W: Write = io::Stdout> {
    total: usize,
    start: Instant,
    last_redraw: Instant,
    out: W,
}

impl ProgressTracker<io::Stdout> {
    pub fn new(total: usize) -> Self {
        Self::with_writer(total, io::stdout(), Instant::now())
    }
}

impl<W: Write> ProgressTracker<W> {
    pub fn with_writer(total: usize, out: W, start: Instant) -> Self {
        info!("Processing {} glyphs...", total);
        Self {
            total,
            start,
            last_redraw: start,
            out,
        }
    }

    /// Report that glyph number `current` (1-based) is being processed.
    pub fn update(&mut self, current: usize, label: &str) {
        self.update_at(current, label, Instant::now());
    }

    /// Same as [`update`](Self::update) with an explicit clock reading.
    /// Returns whether the line was redrawn.
    pub fn update_at(&mut self, current: usize, label: &str, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_redraw) < REDRAW_INTERVAL {
            return false;
        }
        let elapsed = now.saturating_duration_since(self.start);
        let line = render_line(current, self.total, elapsed, label);
        // The bar is cosmetic; a closed stdout must not abort the run.
        let _ = write!(self.out, "\r{line}");
        let _ = self.out.flush();
        self.last_redraw = now;
        true
    }

    pub fn complete(&mut self) {
        self.complete_at(Instant::now());
    }

    pub fn complete_at(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.start);
        let _ = writeln!(
            self.out,
            "\nProgress ({total}/{total}): [{bar}] (100%) total time: {time}",
            total = self.total,
            bar = "=".repeat(BAR_WIDTH),
            time = format_duration(elapsed),
        );
        let _ = self.out.flush();
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Fraction of work done, 0.0 when there is nothing to do.
pub fn fraction(current: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        current as f64 / total as f64
    }
}

/// Estimated time left, extrapolated from the average rate so far.
pub fn estimate_remaining(current: usize, total: usize, elapsed: Duration) -> Duration {
    let elapsed_secs = elapsed.as_secs_f64();
    if current == 0 || elapsed_secs <= 0.0 {
        return Duration::ZERO;
    }
    let per_second = current as f64 / elapsed_secs;
    let remaining = total.saturating_sub(current) as f64;
    Duration::from_secs_f64(remaining / per_second)
}

pub fn render_bar(progress: f64) -> String {
    let filled = ((BAR_WIDTH as f64 * progress) as usize).min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn render_line(current: usize, total: usize, elapsed: Duration, label: &str) -> String {
    let progress = fraction(current, total);
    format!(
        "Progress ({current}/{total}): [{bar}] ({percent:.1}%) elapsed {elapsed} | remaining {remaining} | current: {label}",
        bar = render_bar(progress),
        percent = progress * 100.0,
        elapsed = format_duration(elapsed),
        remaining = format_duration(estimate_remaining(current, total, elapsed)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(render_bar(0.0), "-".repeat(30));
        assert_eq!(render_bar(0.5), format!("{}{}", "#".repeat(15), "-".repeat(15)));
        assert_eq!(render_bar(1.0), "#".repeat(30));
    }

    #[test]
    fn zero_total_is_zero_progress() {
        assert_eq!(fraction(0, 0), 0.0);
        assert_eq!(fraction(3, 0), 0.0);
    }

    #[test]
    fn remaining_time_uses_average_rate() {
        // 10 glyphs in 5 seconds leaves 90 glyphs at 2 per second.
        let eta = estimate_remaining(10, 100, Duration::from_secs(5));
        assert_eq!(eta, Duration::from_secs(45));
        assert_eq!(estimate_remaining(0, 100, Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn line_contains_counts_and_label() {
        let line = render_line(1, 4, Duration::from_secs(1), "U+0041");
        assert!(line.starts_with("Progress (1/4): [#######-"));
        assert!(line.contains("(25.0%)"));
        assert!(line.contains("remaining 3.0s"));
        assert!(line.ends_with("current: U+0041"));
    }

    #[test]
    fn redraws_are_throttled() {
        let start = Instant::now();
        let mut tracker = ProgressTracker::with_writer(10, Vec::new(), start);

        assert!(!tracker.update_at(1, "a", start + Duration::from_millis(50)));
        assert!(tracker.update_at(2, "b", start + Duration::from_millis(250)));
        assert!(!tracker.update_at(3, "c", start + Duration::from_millis(300)));
        assert!(tracker.update_at(4, "d", start + Duration::from_millis(460)));

        let output = String::from_utf8(tracker.into_inner()).unwrap();
        assert_eq!(output.matches('\r').count(), 2);
        assert!(output.contains("current: b"));
        assert!(!output.contains("current: c"));
    }

    #[test]
    fn completion_prints_full_bar() {
        let start = Instant::now();
        let mut tracker = ProgressTracker::with_writer(3, Vec::new(), start);
        tracker.complete_at(start + Duration::from_secs(2));
        let output = String::from_utf8(tracker.into_inner()).unwrap();
        assert!(output.contains("Progress (3/3): [==============================] (100%)"));
        assert!(output.contains("total time: 2.0s"));
    }
}

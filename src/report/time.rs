//! Duration formatting for progress output

use std::time::Duration;

/// Format seconds as seconds, minutes or hours with one decimal.
pub fn format_seconds(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{seconds:.1}s")
    } else if seconds < 3600.0 {
        format!("{:.1}min", seconds / 60.0)
    } else {
        format!("{:.1}h", seconds / 3600.0)
    }
}

pub fn format_duration(duration: Duration) -> String {
    format_seconds(duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_unit_by_magnitude() {
        assert_eq!(format_seconds(0.0), "0.0s");
        assert_eq!(format_seconds(59.94), "59.9s");
        assert_eq!(format_seconds(90.0), "1.5min");
        assert_eq!(format_seconds(5400.0), "1.5h");
    }

    #[test]
    fn unit_boundaries() {
        assert_eq!(format_seconds(60.0), "1.0min");
        assert_eq!(format_seconds(3600.0), "1.0h");
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
    }
}

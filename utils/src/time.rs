//! Time formatting helpers.

/// Format a number of seconds as `H:MM:SS`, the classroom countdown style.
pub fn format_hms(secs: u64) -> String {
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_hms(0), "0:00:00");
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_hms(299), "0:04:59");
        assert_eq!(format_hms(300), "0:05:00");
    }

    #[test]
    fn formats_hours() {
        assert_eq!(format_hms(3_600), "1:00:00");
        assert_eq!(format_hms(3_661), "1:01:01");
    }

    #[test]
    fn hours_field_is_unpadded() {
        assert_eq!(format_hms(36_000), "10:00:00");
    }
}

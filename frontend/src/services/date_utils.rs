//! Date rendering for announcement and map-feed timestamps.
//!
//! The backend emits RFC 3339 timestamps, but older records carry naive
//! ISO timestamps without an offset, so parsing tries both before giving
//! up and passing the raw string through unchanged.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok()
}

/// "January 15, 2026"-style date for announcement headers
pub fn format_display_date(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    match parse_timestamp(raw) {
        Some(parsed) => parsed.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// "Jan 15, 2026 14:05"-style timestamp for the map feed
pub fn format_display_datetime(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    match parse_timestamp(raw) {
        Some(parsed) => parsed.format("%b %-d, %Y %H:%M").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_dates_format_for_display() {
        assert_eq!(
            format_display_date("2026-01-15T09:30:00+00:00"),
            "January 15, 2026"
        );
        assert_eq!(
            format_display_datetime("2026-01-15T09:30:00Z"),
            "Jan 15, 2026 09:30"
        );
    }

    #[test]
    fn test_naive_backend_timestamps_are_accepted() {
        // datetime.utcnow().isoformat() emits no offset
        assert_eq!(
            format_display_date("2025-11-03T16:45:12.123456"),
            "November 3, 2025"
        );
        assert_eq!(format_display_date("2025-11-03"), "November 3, 2025");
    }

    #[test]
    fn test_unparseable_input_passes_through() {
        assert_eq!(format_display_date("last Tuesday"), "last Tuesday");
        assert_eq!(format_display_date(""), "");
        assert_eq!(format_display_date("   "), "");
    }
}

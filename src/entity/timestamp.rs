// src/entity/timestamp.rs
//! ISO-8601 timestamp helpers for the record boundary format
//!
//! Records serialize timestamps as `%Y-%m-%dT%H:%M:%S%.6f` (microsecond
//! precision, no timezone) and must round-trip that form exactly.

use chrono::{NaiveDateTime, Timelike, Utc};

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current time, truncated to whole microseconds.
///
/// The boundary format carries six fraction digits; anything finer
/// would not survive a round-trip through it.
pub fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000).unwrap_or(now)
}

/// Format a timestamp in the boundary form, always six fraction digits.
pub fn format(ts: NaiveDateTime) -> String {
    ts.format(FORMAT).to_string()
}

/// Parse an ISO-8601 date-time, with or without fractional seconds.
pub fn parse(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_keeps_microsecond_precision() {
        let ts = parse("2023-01-01T00:00:00.123456").unwrap();
        assert_eq!(format(ts), "2023-01-01T00:00:00.123456");
    }

    #[test]
    fn test_parse_without_fraction() {
        let ts = parse("2023-01-01T00:00:00").unwrap();
        assert_eq!(format(ts), "2023-01-01T00:00:00.000000");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("invalid_format").is_err());
        assert!(parse("").is_err());
        assert!(parse("2023-01-01").is_err());
    }

    #[test]
    fn test_now_is_whole_microseconds() {
        assert_eq!(now().nanosecond() % 1_000, 0);
    }

    #[test]
    fn test_now_round_trips_through_text() {
        let ts = now();
        assert_eq!(parse(&format(ts)).unwrap(), ts);
    }
}

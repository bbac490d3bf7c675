//! Date normalization for `lastmod` and `publication_date`
//!
//! Sitemaps use the W3C datetime profile. In practice two shapes cover nearly
//! every feed: a full RFC 3339 timestamp and a bare `YYYY-MM-DD` date. Anything
//! else is treated as absent rather than as an error.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

/// Parse a sitemap date, RFC 3339 first, then a date-only value at midnight UTC
pub fn normalize(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed);
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(FixedOffset::east_opt(0)?.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::SecondsFormat;

    fn rfc3339(value: &str) -> Option<String> {
        normalize(value).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    #[test]
    fn test_full_timestamp_keeps_offset() {
        assert_eq!(rfc3339("2004-12-23T18:00:15+02:00").as_deref(), Some("2004-12-23T18:00:15+02:00"));
        assert_eq!(rfc3339("2005-01-01T10:00:00Z").as_deref(), Some("2005-01-01T10:00:00Z"));
    }

    #[test]
    fn test_fractional_seconds() {
        let parsed = normalize("2020-06-15T08:30:00.250+00:00").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_date_only_is_midnight_utc() {
        assert_eq!(rfc3339("2005-01-01").as_deref(), Some("2005-01-01T00:00:00Z"));
        assert_eq!(rfc3339("  2005-01-01\n").as_deref(), Some("2005-01-01T00:00:00Z"));
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize("yesterday"), None);
        assert_eq!(normalize("2005-13-01"), None);
        assert_eq!(normalize("2005-01-01T10:00"), None);
    }
}

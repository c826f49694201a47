//! Calendar date normalization.
//!
//! Clients send dates as ISO dates, ISO date-times or day/month/year with
//! `/`, `-` or `.` separators. Everything is stored as `YYYY-MM-DD`.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

const ISO_DATE: &str = "%Y-%m-%d";

fn day_month_year() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4})$").expect("static date pattern")
    })
}

/// Parse any accepted form into a calendar date
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, ISO_DATE) {
        return Some(date);
    }

    // Offset date-times resolve to the UTC calendar day
    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Some(datetime.with_timezone(&Utc).date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, format) {
            return Some(datetime.date());
        }
    }

    let captures = day_month_year().captures(input)?;
    let day = captures[1].parse().ok()?;
    let month = captures[2].parse().ok()?;
    let year = captures[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Normalize to `YYYY-MM-DD`; unparseable input yields `None` and a warning
pub fn normalize_date(input: &str) -> Option<String> {
    if input.trim().is_empty() {
        return None;
    }

    match parse_calendar_date(input) {
        Some(date) => Some(date.format(ISO_DATE).to_string()),
        None => {
            tracing::warn!(value = %input, "unrecognized date format, storing null");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date_unchanged() {
        assert_eq!(normalize_date("2024-03-15").as_deref(), Some("2024-03-15"));
    }

    #[test]
    fn test_day_month_year() {
        assert_eq!(normalize_date("15/03/2024").as_deref(), Some("2024-03-15"));
        assert_eq!(normalize_date("5/3/2024").as_deref(), Some("2024-03-05"));
        assert_eq!(normalize_date("05-03-2024").as_deref(), Some("2024-03-05"));
        assert_eq!(normalize_date("05.03.2024").as_deref(), Some("2024-03-05"));
    }

    #[test]
    fn test_datetimes_truncate_to_day() {
        assert_eq!(
            normalize_date("2024-03-15T10:20:30.000Z").as_deref(),
            Some("2024-03-15")
        );
        assert_eq!(
            normalize_date("2024-03-15T10:20:30").as_deref(),
            Some("2024-03-15")
        );
        assert_eq!(
            normalize_date("2024-03-15 08:00:00").as_deref(),
            Some("2024-03-15")
        );
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(normalize_date("next tuesday"), None);
        assert_eq!(normalize_date("31/02/2024"), None);
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("   "), None);
    }
}

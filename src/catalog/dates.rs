use chrono::{DateTime, NaiveDate, Utc};

/// Timestamps are stored as RFC 3339 strings so lexicographic comparison in
/// SQL matches chronological order.
#[must_use]
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Floors a `YYYY-MM-DD` (or RFC 3339) value to the start of that day.
#[must_use]
pub fn start_of_day(raw: &str) -> Option<String> {
    parse_date(raw).map(|d| format!("{d}T00:00:00+00:00"))
}

/// Ceils a `YYYY-MM-DD` (or RFC 3339) value to the end of that day.
#[must_use]
pub fn end_of_day(raw: &str) -> Option<String> {
    parse_date(raw).map(|d| format!("{d}T23:59:59.999+00:00"))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// `HH:mm - DD/MM/YYYY`, the admin listing display format.
#[must_use]
pub fn format_timestamp(raw: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.format("%H:%M - %d/%m/%Y").to_string())
}

/// `DD/MM/YYYY`, the release-date display format.
#[must_use]
pub fn format_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|d| d.format("%d/%m/%Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_bounds() {
        assert_eq!(
            start_of_day("2026-03-15").as_deref(),
            Some("2026-03-15T00:00:00+00:00")
        );
        assert_eq!(
            end_of_day("2026-03-15").as_deref(),
            Some("2026-03-15T23:59:59.999+00:00")
        );
        assert!(start_of_day("not-a-date").is_none());
    }

    #[test]
    fn accepts_rfc3339_input() {
        assert_eq!(
            start_of_day("2026-03-15T18:22:01+00:00").as_deref(),
            Some("2026-03-15T00:00:00+00:00")
        );
    }

    #[test]
    fn display_formats() {
        assert_eq!(
            format_timestamp("2026-03-15T18:22:01+00:00").as_deref(),
            Some("18:22 - 15/03/2026")
        );
        assert_eq!(format_date("2026-03-15").as_deref(), Some("15/03/2026"));
    }

    #[test]
    fn bounds_compare_lexicographically() {
        let start = start_of_day("2026-03-15").unwrap();
        let end = end_of_day("2026-03-15").unwrap();
        let inside = "2026-03-15T12:00:00+00:00".to_string();
        assert!(start <= inside && inside <= end);
    }
}

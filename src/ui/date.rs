//! Human-friendly dates.

use chrono::{DateTime, Local, TimeZone};

/// `n` with its English ordinal suffix: 1st, 2nd, 3rd, 4th, 11th, 21st.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, r) if r != 11 => "st",
        (2, r) if r != 12 => "nd",
        (3, r) if r != 13 => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Render a moment in local time as e.g. "1st Jan 2024".
pub fn format_date<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    use chrono::Datelike;

    let local = time.with_timezone(&Local);
    format!("{} {}", ordinal(local.day()), local.format("%b %Y"))
}

/// Parse a JIRA timestamp.
///
/// The agile API uses RFC 3339 (`2024-01-01T09:00:00.000Z`) while the
/// platform API writes offsets without a colon
/// (`2024-01-01T09:00:00.000+0000`). Both are accepted.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
        .map(|t| t.with_timezone(&Local))
}

/// Days from `now` until `end`, as a fraction; negative once `end` passed.
pub fn days_between(now: &DateTime<Local>, end: &DateTime<Local>) -> f64 {
    (*end - *now).num_seconds() as f64 / 86_400.0
}

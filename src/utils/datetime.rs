use chrono::{DateTime, Utc};

/// Formats a timestamp as "16 Oct 2025, 19:42".
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%d %b %Y, %H:%M").to_string()
}

/// Formats an RFC 3339 string the same way, falling back to the raw input
/// when it does not parse.
pub fn format_rfc3339(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| format_datetime(&dt.with_timezone(&Utc)))
        .unwrap_or_else(|_| raw.to_string())
}

//! Small helpers for logging and display formatting.

use chrono::{DateTime, Utc};

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` bytes are cut at the nearest character boundary
/// at or below `max` and get `"…(+N bytes)"` appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Capitalize the first character of a string.
///
/// ```ignore
/// assert_eq!(upcase("sports"), "Sports");
/// ```
pub fn upcase(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

/// Human age of an RFC 3339 timestamp relative to `now`, e.g. `"3 hours ago"`.
///
/// # Arguments
///
/// * `timestamp` - Raw `published_at` value from the news API
/// * `now` - Reference time
///
/// # Returns
///
/// `None` when `timestamp` does not parse; callers then show the raw
/// string only. Timestamps in the future read as `"just now"`.
pub fn relative_age(timestamp: &str, now: DateTime<Utc>) -> Option<String> {
    let published = DateTime::parse_from_rfc3339(timestamp.trim()).ok()?;
    let secs = now.signed_duration_since(published.with_timezone(&Utc)).num_seconds();

    let (n, unit) = match secs {
        s if s < 60 => return Some("just now".to_string()),
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s => (s / 86_400, "day"),
    };
    let plural = if n == 1 { "" } else { "s" };
    Some(format!("{} {}{} ago", n, unit, plural))
}

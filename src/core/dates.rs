//! Lenient parsing of event timestamps.
//!
//! Usage exports carry dates in a handful of shapes: a bare ISO date, an ISO
//! datetime with either a space or `T` separator (optionally with fractional
//! seconds and a `Z`/offset suffix), or `M/D/YYYY`. Anything else is treated
//! as not-a-date and degrades per the caller's rules.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse an event date cell into a local-naive datetime.
/// Bare dates resolve to midnight. Returns `None` for unparsable input.
pub fn parse_event_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Zoned ISO datetime ("2024-01-05T10:30:00Z", "...+02:00").
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Parse an event date cell down to its calendar day.
pub fn parse_event_date(s: &str) -> Option<NaiveDate> {
    parse_event_datetime(s).map(|dt| dt.date())
}

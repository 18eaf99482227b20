//! Timestamp parsing and display formatting.
//!
//! Documents carry RFC 3339 strings; comparisons run on epoch milliseconds.
//! The browser clock is only read under `hydrate`; elsewhere the system clock
//! stands in so SSR and tests stay deterministic enough to reason about.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Current time in epoch milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        {
            js_sys::Date::now() as i64
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let now = OffsetDateTime::now_utc();
        i64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or_default()
    }
}

fn from_ms(ms: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::UNIX_EPOCH.checked_add(Duration::milliseconds(ms))
}

#[must_use]
pub fn parse_rfc3339_ms(raw: &str) -> Option<i64> {
    let parsed = OffsetDateTime::parse(raw.trim(), &Rfc3339).ok()?;
    i64::try_from(parsed.unix_timestamp_nanos() / 1_000_000).ok()
}

#[must_use]
pub fn to_rfc3339(ms: i64) -> String {
    from_ms(ms).and_then(|t| t.format(&Rfc3339).ok()).unwrap_or_default()
}

#[must_use]
pub fn now_rfc3339() -> String {
    to_rfc3339(now_ms())
}

/// `Mar 1, 2026`
#[must_use]
pub fn format_date(ms: i64) -> String {
    from_ms(ms)
        .and_then(|t| t.format(format_description!("[month repr:short] [day padding:none], [year]")).ok())
        .unwrap_or_default()
}

/// Date of an RFC 3339 string for display, or a dash when absent/invalid.
#[must_use]
pub fn display_date(raw: Option<&str>) -> String {
    raw.and_then(parse_rfc3339_ms).map_or_else(|| "-".to_owned(), format_date)
}

/// `YYYY-MM-DD` for `<input type="date">` values.
#[must_use]
pub fn format_day(ms: i64) -> String {
    from_ms(ms)
        .and_then(|t| t.format(format_description!("[year]-[month]-[day]")).ok())
        .unwrap_or_default()
}

/// Start of a `YYYY-MM-DD` day (UTC) in epoch milliseconds.
#[must_use]
pub fn day_start_ms(raw: &str) -> Option<i64> {
    let date = crate::state::guest_info::parse_day(raw)?;
    let start = date.midnight().assume_utc();
    i64::try_from(start.unix_timestamp_nanos() / 1_000_000).ok()
}

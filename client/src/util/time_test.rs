use super::*;

#[test]
fn parse_rfc3339_to_millis() {
    assert_eq!(parse_rfc3339_ms("1970-01-01T00:00:01Z"), Some(1_000));
    assert_eq!(parse_rfc3339_ms("2026-03-01T10:00:00.250+01:00"), Some(1_772_355_600_250));
    assert_eq!(parse_rfc3339_ms("yesterday"), None);
}

#[test]
fn to_rfc3339_round_trips_through_parse() {
    let ms = 1_772_355_600_250;
    assert_eq!(parse_rfc3339_ms(&to_rfc3339(ms)), Some(ms));
}

#[test]
fn format_date_is_short_month() {
    assert_eq!(format_date(parse_rfc3339_ms("2026-03-01T10:00:00Z").unwrap()), "Mar 1, 2026");
    assert_eq!(display_date(Some("2026-12-24T00:00:00Z")), "Dec 24, 2026");
    assert_eq!(display_date(None), "-");
    assert_eq!(display_date(Some("bad")), "-");
}

#[test]
fn day_helpers_use_utc_midnight() {
    let start = day_start_ms("2026-03-01").unwrap();
    assert_eq!(format_day(start), "2026-03-01");
    assert_eq!(day_start_ms("2026-03-02").unwrap() - start, DAY_MS);
    assert_eq!(day_start_ms("03/01/2026"), None);
}

#[test]
fn now_is_after_2020() {
    assert!(now_ms() > parse_rfc3339_ms("2020-01-01T00:00:00Z").unwrap());
}

use super::{format_timestamp, generate_id, Clock, DEFAULT_FORMAT, ISO_FORMAT};
use jiff::civil::date;
use jiff::tz::{self, TimeZone};
use jiff::Zoned;

struct FixedClock(Zoned);

impl Clock for FixedClock {
    fn now(&self) -> Zoned {
        self.0.clone()
    }
}

fn at(year: i16, month: i8, day: i8, hour: i8, minute: i8, second: i8, nanos: i32) -> Zoned {
    date(year, month, day)
        .at(hour, minute, second, nanos)
        .to_zoned(TimeZone::UTC)
        .unwrap()
}

fn sample() -> Zoned {
    at(2024, 1, 2, 3, 4, 5, 0)
}

#[test]
fn test_default_format() {
    assert_eq!(format_timestamp(&sample(), DEFAULT_FORMAT), "20240102030405");
}

#[test]
fn test_short_format_with_separator() {
    assert_eq!(format_timestamp(&sample(), "YYMMDD-HHmm"), "240102-0304");
}

#[test]
fn test_unpadded_tokens() {
    assert_eq!(format_timestamp(&sample(), "Y-M-D H:m:s"), "Y-1-2 3:4:5");
}

#[test]
fn test_names_and_calendar_tokens() {
    assert_eq!(format_timestamp(&sample(), "dddd, MMMM D"), "Tuesday, January 2");
    assert_eq!(format_timestamp(&sample(), "ddd MMM dd d"), "Tue Jan Tu 2");
    assert_eq!(format_timestamp(&sample(), "DDDD DDD Q"), "002 2 1");
}

#[test]
fn test_ordinal_day() {
    let ordinal = |day| format_timestamp(&at(2024, 3, day, 0, 0, 0, 0), "Do");
    assert_eq!(ordinal(1), "1st");
    assert_eq!(ordinal(2), "2nd");
    assert_eq!(ordinal(3), "3rd");
    assert_eq!(ordinal(4), "4th");
    assert_eq!(ordinal(11), "11th");
    assert_eq!(ordinal(12), "12th");
    assert_eq!(ordinal(13), "13th");
    assert_eq!(ordinal(21), "21st");
    assert_eq!(ordinal(22), "22nd");
    assert_eq!(ordinal(31), "31st");
}

#[test]
fn test_week_numbers() {
    assert_eq!(format_timestamp(&sample(), "w ww W WW"), "1 01 1 01");
    // Sunday starts the second locale week, but is still in ISO week 1
    assert_eq!(format_timestamp(&at(2024, 1, 7, 0, 0, 0, 0), "w W"), "2 1");
    // Week holding January 1st counts for the new year
    assert_eq!(format_timestamp(&at(2024, 12, 31, 0, 0, 0, 0), "w W"), "1 1");
    assert_eq!(format_timestamp(&at(2021, 1, 1, 0, 0, 0, 0), "w W"), "1 53");
}

#[test]
fn test_twelve_hour_clock() {
    assert_eq!(format_timestamp(&sample(), "h:mm A"), "3:04 AM");
    let afternoon = at(2024, 6, 30, 15, 0, 0, 0);
    assert_eq!(format_timestamp(&afternoon, "hh:mm a"), "03:00 pm");
    let midnight = at(2024, 6, 30, 0, 30, 0, 0);
    assert_eq!(format_timestamp(&midnight, "hh kk k"), "12 24 24");
}

#[test]
fn test_fractional_seconds() {
    let time = at(2024, 1, 2, 3, 4, 5, 123_000_000);
    assert_eq!(format_timestamp(&time, "ss.SSS"), "05.123");
    assert_eq!(format_timestamp(&time, "SS S"), "12 1");
}

#[test]
fn test_unix_timestamps() {
    assert_eq!(format_timestamp(&sample(), "X"), "1704164645");
    assert_eq!(format_timestamp(&sample(), "x"), "1704164645000");
    let time = at(2024, 1, 2, 3, 4, 5, 123_000_000);
    assert_eq!(format_timestamp(&time, "x"), "1704164645123");
}

#[test]
fn test_utc_offsets() {
    assert_eq!(format_timestamp(&sample(), "Z ZZ"), "+00:00 +0000");

    let behind = date(2024, 1, 2)
        .at(3, 4, 5, 0)
        .to_zoned(TimeZone::fixed(tz::offset(-5)))
        .unwrap();
    assert_eq!(format_timestamp(&behind, "Z ZZ"), "-05:00 -0500");
    assert_eq!(format_timestamp(&behind, "HH X"), "03 1704182645");
}

#[test]
fn test_bracketed_text_is_literal() {
    assert_eq!(format_timestamp(&sample(), "[id-]YYYY"), "id-2024");
    assert_eq!(format_timestamp(&sample(), "[YYYY]"), "YYYY");
    assert_eq!(format_timestamp(&sample(), "[YY"), "[24");
}

#[test]
fn test_empty_format_uses_iso_default() {
    assert_eq!(format_timestamp(&sample(), ""), "2024-01-02T03:04:05+00:00");
    assert_eq!(
        format_timestamp(&sample(), ""),
        format_timestamp(&sample(), ISO_FORMAT)
    );
}

#[test]
fn test_degenerate_formats() {
    assert_eq!(format_timestamp(&sample(), "xyz"), "1704164645000yz");
    assert_eq!(format_timestamp(&sample(), "[]"), "");
    assert_eq!(format_timestamp(&sample(), "[tag]"), "tag");
}

#[test]
fn test_generate_id_uses_clock() {
    let clock = FixedClock(sample());
    assert_eq!(generate_id(DEFAULT_FORMAT, &clock), "20240102030405");
    assert_eq!(generate_id("X", &clock), "1704164645");
    assert_eq!(generate_id("", &clock), "2024-01-02T03:04:05+00:00");
}

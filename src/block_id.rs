//! Timestamp-based block id generation.
//!
//! Ids are the current local time rendered through a moment.js-style pattern such as
//! `YYYYMMDDHHmmss`. Text in square brackets is copied literally, and characters that
//! are not part of a token pass through unchanged. Patterns are never validated; an
//! empty pattern renders as moment's own default, [`ISO_FORMAT`].

use jiff::civil::Date;
use jiff::{ToSpan, Zoned};
use log::warn;
use std::fmt::{self, Write};

/// Pattern used when no format has been configured.
pub const DEFAULT_FORMAT: &str = "YYYYMMDDHHmmss";

/// Pattern an empty format falls back to.
pub const ISO_FORMAT: &str = "YYYY-MM-DDTHH:mm:ssZ";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

// Longer tokens must precede their prefixes.
const TOKENS: [&str; 39] = [
    "YYYY", "YY", "Q", "MMMM", "MMM", "MM", "M", "DDDD", "DDD", "DD", "Do", "D", "dddd", "ddd",
    "dd", "d", "ww", "w", "WW", "W", "HH", "H", "hh", "h", "kk", "k", "mm", "m", "ss", "s",
    "SSS", "SS", "S", "A", "a", "ZZ", "Z", "X", "x",
];

/// Source of the current wall-clock time.
pub trait Clock {
    /// Current time in the local time zone.
    fn now(&self) -> Zoned;
}

/// Clock backed by the system time in the local time zone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Zoned {
        Zoned::now()
    }
}

fn ordinal_suffix(n: i8) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Week of the year with weeks starting on Sunday and week 1 holding January 1st.
fn locale_week(date: Date) -> i16 {
    let to_saturday = 6 - date.weekday().to_sunday_zero_offset();
    // The Saturday closing this week decides which year the week belongs to
    let saturday = date
        .checked_add(i64::from(to_saturday).days())
        .unwrap_or(date);
    (saturday.day_of_year() - 1) / 7 + 1
}

fn write_offset(out: &mut String, time: &Zoned, separator: &str) -> fmt::Result {
    let seconds = time.offset().seconds();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    write!(out, "{sign}{:02}{separator}{:02}", minutes / 60, minutes % 60)
}

fn write_token(out: &mut String, token: &str, time: &Zoned) -> fmt::Result {
    let date = time.date();
    let month = usize::try_from(time.month() - 1).unwrap_or_default();
    let weekday = usize::try_from(time.weekday().to_sunday_zero_offset()).unwrap_or_default();
    let hour = time.hour();
    let hour12 = (hour + 11) % 12 + 1;

    match token {
        "YYYY" => write!(out, "{:04}", time.year()),
        "YY" => write!(out, "{:02}", time.year().rem_euclid(100)),
        "Q" => write!(out, "{}", (time.month() - 1) / 3 + 1),
        "MMMM" => out.write_str(MONTHS[month]),
        "MMM" => out.write_str(&MONTHS[month][..3]),
        "MM" => write!(out, "{:02}", time.month()),
        "M" => write!(out, "{}", time.month()),
        "DDDD" => write!(out, "{:03}", date.day_of_year()),
        "DDD" => write!(out, "{}", date.day_of_year()),
        "DD" => write!(out, "{:02}", time.day()),
        "Do" => write!(out, "{}{}", time.day(), ordinal_suffix(time.day())),
        "D" => write!(out, "{}", time.day()),
        "dddd" => out.write_str(WEEKDAYS[weekday]),
        "ddd" => out.write_str(&WEEKDAYS[weekday][..3]),
        "dd" => out.write_str(&WEEKDAYS[weekday][..2]),
        "d" => write!(out, "{weekday}"),
        "ww" => write!(out, "{:02}", locale_week(date)),
        "w" => write!(out, "{}", locale_week(date)),
        "WW" => write!(out, "{:02}", date.iso_week_date().week()),
        "W" => write!(out, "{}", date.iso_week_date().week()),
        "HH" => write!(out, "{hour:02}"),
        "H" => write!(out, "{hour}"),
        "hh" => write!(out, "{hour12:02}"),
        "h" => write!(out, "{hour12}"),
        "kk" => write!(out, "{:02}", if hour == 0 { 24 } else { hour }),
        "k" => write!(out, "{}", if hour == 0 { 24 } else { hour }),
        "mm" => write!(out, "{:02}", time.minute()),
        "m" => write!(out, "{}", time.minute()),
        "ss" => write!(out, "{:02}", time.second()),
        "s" => write!(out, "{}", time.second()),
        "SSS" => write!(out, "{:03}", time.millisecond()),
        "SS" => write!(out, "{:02}", time.millisecond() / 10),
        "S" => write!(out, "{}", time.millisecond() / 100),
        "A" => out.write_str(if hour < 12 { "AM" } else { "PM" }),
        "a" => out.write_str(if hour < 12 { "am" } else { "pm" }),
        "ZZ" => write_offset(out, time, ""),
        "Z" => write_offset(out, time, ":"),
        "X" => write!(out, "{}", time.timestamp().as_second()),
        "x" => write!(out, "{}", time.timestamp().as_millisecond()),
        _ => out.write_str(token),
    }
}

#[must_use]
/// Render `time` through a moment.js-style `pattern`.
pub fn format_timestamp(time: &Zoned, pattern: &str) -> String {
    let mut out = String::new();
    let mut rest = if pattern.is_empty() {
        ISO_FORMAT
    } else {
        pattern
    };

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(close) = rest.find(']') {
                out.push_str(&rest[1..close]);
                rest = &rest[close + 1..];
                continue;
            }
        }

        if let Some(token) = TOKENS.iter().find(|token| rest.starts_with(*token)) {
            // Writing into a String cannot fail
            let _ = write_token(&mut out, token, time);
            rest = &rest[token.len()..];
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    out
}

#[must_use]
/// Generate a fresh block id from the clock's current time.
pub fn generate_id(pattern: &str, clock: &dyn Clock) -> String {
    let id = format_timestamp(&clock.now(), pattern);
    if id.is_empty() {
        warn!("Block id format {pattern:?} produced an empty id");
    }
    id
}

#[cfg(test)]
#[path = "tests/block_id.rs"]
mod tests;

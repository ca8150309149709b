//! Digit conversion, `Y/MM/DD` rendering and lenient date parsing.

use std::fmt::Display;

use crate::consts::{ACCEPTED_SEPARATORS, DATE_SEPARATOR, PERSIAN_DIGITS, RANGE_ARROW};
use crate::types::{JalaliDate, NumeralType};

/// Replaces every ASCII digit with its Persian glyph, leaving other characters alone.
pub fn to_persian_num(value: impl Display) -> String {
    value
        .to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => PERSIAN_DIGITS[d as usize],
            _ => c,
        })
        .collect()
}

/// Replaces every Persian digit glyph with its ASCII digit.
pub fn from_persian_num(s: &str) -> String {
    s.chars()
        .map(|c| {
            PERSIAN_DIGITS
                .iter()
                .position(|&p| p == c)
                .and_then(|d| char::from_digit(u32::try_from(d).ok()?, 10))
                .unwrap_or(c)
        })
        .collect()
}

/// Renders a number in the requested digit glyphs.
pub fn format_num(value: impl Display, numeral_type: NumeralType) -> String {
    match numeral_type {
        NumeralType::Latin => value.to_string(),
        NumeralType::Persian => to_persian_num(value),
    }
}

/// Zero-padded `Y/MM/DD` in Latin digits.
pub fn format_date(year: i32, month: u8, day: u8) -> String {
    JalaliDate::from_ymd(year, month, day).to_string()
}

/// Zero-padded `Y/MM/DD` in Persian digits.
pub fn format_persian(year: i32, month: u8, day: u8) -> String {
    to_persian_num(format_date(year, month, day))
}

/// Both ends of a range the way the range input shows them.
pub fn format_range(start: JalaliDate, end: JalaliDate, numeral_type: NumeralType) -> String {
    format!(
        "{}{RANGE_ARROW}{}",
        format_num(start, numeral_type),
        format_num(end, numeral_type)
    )
}

/// Parses `year/month/day` typed with Latin or Persian digits and any of
/// `/`, `-` or `.` as separators.
///
/// Only the shape is checked: three integer parts, each in range for its
/// field type. Month and day-of-month validity is left to the caller.
pub fn parse_date_string(s: &str) -> Option<JalaliDate> {
    let normalized: String = from_persian_num(s)
        .chars()
        .map(|c| if ACCEPTED_SEPARATORS.contains(&c) { DATE_SEPARATOR } else { c })
        .collect();

    let parts: Vec<&str> = normalized.split(DATE_SEPARATOR).map(str::trim).collect();
    let [year, month, day] = parts.as_slice() else {
        return None;
    };

    Some(JalaliDate::from_ymd(
        year.parse().ok()?,
        month.parse().ok()?,
        day.parse().ok()?,
    ))
}

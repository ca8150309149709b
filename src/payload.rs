//! The date snapshot handed to listeners and host code.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::format::{format_date, format_persian};
use crate::math;
use crate::types::{OutputFormat, month_name};
use crate::{CalendarError, CalendarResult};

/// Jalali side of a [`DatePayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JalaliPart {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub month_name: String,
    /// `Y/MM/DD` in Latin digits
    pub formatted: String,
    /// `Y/MM/DD` in Persian digits
    pub formatted_persian: String,
    pub timestamp: i64,
}

/// Gregorian side of a [`DatePayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GregorianPart {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub month_name: String,
    /// `Y-MM-DD`
    pub formatted: String,
    pub date: NaiveDate,
    pub timestamp: i64,
}

/// Everything a consumer may want to know about a picked day.
///
/// Which parts are present follows the [`OutputFormat`] it was built with;
/// `iso` and `timestamp` are always there. Timestamps are milliseconds since
/// the Unix epoch at UTC midnight of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jalali: Option<JalaliPart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gregorian: Option<GregorianPart>,
    pub iso: String,
    pub timestamp: i64,
}

/// Builds the payload for Jalali `year/month/day`, trimmed to `format`.
///
/// # Errors
/// Returns `CalendarError::InvalidYear` when the year is outside the breaks
/// table and `CalendarError::InvalidMonth` for a month with no name.
pub fn build_date_payload(
    year: i32,
    month: u8,
    day: u8,
    format: OutputFormat,
) -> CalendarResult<DatePayload> {
    let jalali_month_name = month_name(month).ok_or(CalendarError::InvalidMonth(month))?;
    let g = math::to_gregorian(year, month, day)?;
    let date = g.to_naive_date().ok_or(CalendarError::InvalidYear(year))?;
    let gregorian_month_name = g.month_name().ok_or(CalendarError::InvalidMonth(g.month))?;
    let timestamp = date
        .and_time(chrono::NaiveTime::MIN)
        .and_utc()
        .timestamp_millis();
    let iso = g.to_string();

    let jalali = format.includes_jalali().then(|| JalaliPart {
        year,
        month,
        day,
        month_name: jalali_month_name.to_owned(),
        formatted: format_date(year, month, day),
        formatted_persian: format_persian(year, month, day),
        timestamp,
    });

    let gregorian = format.includes_gregorian().then(|| GregorianPart {
        year: g.year,
        month: g.month,
        day: g.day,
        month_name: gregorian_month_name.to_owned(),
        formatted: iso.clone(),
        date,
        timestamp,
    });

    Ok(DatePayload {
        jalali,
        gregorian,
        iso,
        timestamp,
    })
}

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CalendarError, JalaliDate, Jdn, RANGE_ARROW, prelude::*};

/// An inclusive span between two Jalali dates.
/// The start date is never after the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[display(fmt = "{start}{}{end}", RANGE_ARROW)]
pub struct DateRange {
    start: JalaliDate,
    end:   JalaliDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: JalaliDate, end: JalaliDate },

    /// A bound could not be converted.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start is after end.
    pub fn new(start: JalaliDate, end: JalaliDate) -> Result<Self, RangeError> {
        if start.to_jdn()? > end.to_jdn()? {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range from two dates picked in either order.
    ///
    /// # Errors
    /// Returns `RangeError::Calendar` if either date cannot be converted.
    pub fn ordered(a: JalaliDate, b: JalaliDate) -> Result<Self, RangeError> {
        if b.to_jdn()? < a.to_jdn()? {
            Ok(Self { start: b, end: a })
        } else {
            Ok(Self { start: a, end: b })
        }
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> JalaliDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> JalaliDate {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (JalaliDate, JalaliDate) {
        (self.start, self.end)
    }

    /// Number of days covered, counting both ends.
    ///
    /// # Errors
    /// Returns `RangeError::Calendar` if either bound cannot be converted.
    pub fn span_days(&self) -> Result<Jdn, RangeError> {
        inclusive_span(self.start, self.end).map_err(RangeError::from)
    }

    /// Checks if the range contains a given date, bounds included
    pub fn contains(&self, date: JalaliDate) -> bool {
        match (self.start.to_jdn(), self.end.to_jdn(), date.to_jdn()) {
            (Ok(start), Ok(end), Ok(day)) => start <= day && day <= end,
            _ => false,
        }
    }
}

/// Days between two dates counting both ends, in either order.
pub(crate) fn inclusive_span(a: JalaliDate, b: JalaliDate) -> Result<Jdn, CalendarError> {
    Ok((b.to_jdn()? - a.to_jdn()?).abs() + 1)
}

/// Named quick-pick ranges relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    /// Saturday through Friday of the current week.
    #[display(fmt = "thisWeek")]
    ThisWeek,
    /// First through last day of the current month.
    #[display(fmt = "thisMonth")]
    ThisMonth,
    /// Six days ago through today.
    #[serde(alias = "last7Days")]
    #[display(fmt = "last7")]
    Last7,
    /// Twenty-nine days ago through today.
    #[serde(alias = "last30Days")]
    #[display(fmt = "last30")]
    Last30,
}

impl FromStr for Preset {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "thisWeek" => Ok(Self::ThisWeek),
            "thisMonth" => Ok(Self::ThisMonth),
            "last7" | "last7Days" => Ok(Self::Last7),
            "last30" | "last30Days" => Ok(Self::Last30),
            other => Err(CalendarError::InvalidFormat(format!("unknown preset: {other}"))),
        }
    }
}

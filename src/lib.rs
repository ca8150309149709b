//! Headless Jalali (Solar Hijri) calendar engine.
//!
//! Two layers live here. [`math`] converts between Jalali and Gregorian
//! dates through Julian Day Numbers using the 33-year breaks table, and
//! [`CalendarEngine`] keeps the view, selection and constraint state a
//! date-picker widget needs, publishing changes through an observer registry.
//! Rendering, input masking and popover handling belong to the host.

mod config;
mod consts;
mod engine;
mod events;
mod format;
mod grid;
pub mod math;
mod payload;
mod prelude;
mod range;
pub mod telemetry;
mod types;

pub use config::{DisabledDates, EngineOption, EngineOptions, HighlightedDate};
pub use consts::*;
pub use engine::{CalendarEngine, SelectionValue, ViewInfo};
pub use events::{CalendarEvent, EventKind, Subscription};
pub use format::{
    format_date, format_num, format_persian, format_range, from_persian_num, parse_date_string,
    to_persian_num,
};
pub use grid::{DayCell, MonthCell, YearCell};
pub use payload::{DatePayload, GregorianPart, JalaliPart, build_date_payload};
pub use range::{DateRange, Preset, RangeError};
pub use types::{GregorianDate, JalaliDate, NumeralType, OutputFormat, ViewMode, weekday_name};

use crate::prelude::*;

/// Julian Day Number, the linear day count shared by both calendars.
pub type Jdn = i64;

/// Result alias for fallible calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CalendarError {
    #[display(fmt = "Invalid Jalaali year: {_0}")]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}/{month:02}")]
    InvalidDay { year: i32, month: u8, day: u8 },
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for CalendarError {}

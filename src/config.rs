use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_HIGHLIGHT_CLASS;
use crate::types::{JalaliDate, NumeralType, OutputFormat};

/// Dates the user may not pick, beyond the min/max bounds.
#[derive(Clone)]
pub enum DisabledDates {
    /// Exact dates.
    List(Vec<JalaliDate>),
    /// Called with `(year, month, day)`; `true` disables the date.
    Predicate(Rc<dyn Fn(i32, u8, u8) -> bool>),
}

impl DisabledDates {
    /// Wraps a closure as a predicate.
    pub fn predicate(f: impl Fn(i32, u8, u8) -> bool + 'static) -> Self {
        Self::Predicate(Rc::new(f))
    }

    pub fn contains(&self, date: JalaliDate) -> bool {
        match self {
            Self::List(dates) => dates.contains(&date),
            Self::Predicate(f) => f(date.year, date.month, date.day),
        }
    }
}

impl fmt::Debug for DisabledDates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(dates) => f.debug_tuple("List").field(dates).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<Vec<JalaliDate>> for DisabledDates {
    fn from(dates: Vec<JalaliDate>) -> Self {
        Self::List(dates)
    }
}

/// A date rendered with an extra visual tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightedDate {
    pub date: JalaliDate,
    #[serde(default)]
    pub class_name: Option<String>,
}

impl HighlightedDate {
    pub const fn new(date: JalaliDate) -> Self {
        Self {
            date,
            class_name: None,
        }
    }

    #[must_use]
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// The tag to render, falling back to the default one.
    pub fn class(&self) -> &str {
        self.class_name.as_deref().unwrap_or(DEFAULT_HIGHLIGHT_CLASS)
    }
}

/// Construction-time configuration for [`crate::CalendarEngine`].
///
/// Every field is optional; `Default` gives single-date selection with no
/// constraints, both calendars in payloads and Persian digits.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub range_mode: bool,
    pub min_date: Option<JalaliDate>,
    pub max_date: Option<JalaliDate>,
    pub disabled_dates: Option<DisabledDates>,
    pub highlighted_dates: Vec<HighlightedDate>,
    /// Largest inclusive day span a committed range may cover. `None` and
    /// `Some(0)` both mean unbounded.
    pub max_range: Option<u32>,
    pub output_format: OutputFormat,
    pub numeral_type: NumeralType,
    /// Starting view; defaults to today's year.
    pub initial_year: Option<i32>,
    /// Starting view; defaults to today's month.
    pub initial_month: Option<u8>,
}

impl EngineOptions {
    #[must_use]
    pub const fn with_range_mode(mut self, range_mode: bool) -> Self {
        self.range_mode = range_mode;
        self
    }

    #[must_use]
    pub const fn with_min_date(mut self, date: JalaliDate) -> Self {
        self.min_date = Some(date);
        self
    }

    #[must_use]
    pub const fn with_max_date(mut self, date: JalaliDate) -> Self {
        self.max_date = Some(date);
        self
    }

    #[must_use]
    pub fn with_disabled_dates(mut self, disabled: impl Into<DisabledDates>) -> Self {
        self.disabled_dates = Some(disabled.into());
        self
    }

    #[must_use]
    pub fn with_highlighted_dates(mut self, highlighted: Vec<HighlightedDate>) -> Self {
        self.highlighted_dates = highlighted;
        self
    }

    #[must_use]
    pub const fn with_max_range(mut self, days: u32) -> Self {
        self.max_range = if days == 0 { None } else { Some(days) };
        self
    }

    #[must_use]
    pub const fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub const fn with_numeral_type(mut self, numeral_type: NumeralType) -> Self {
        self.numeral_type = numeral_type;
        self
    }

    #[must_use]
    pub const fn with_initial_view(mut self, year: i32, month: u8) -> Self {
        self.initial_year = Some(year);
        self.initial_month = Some(month);
        self
    }
}

/// A single option change applied through [`crate::CalendarEngine::set_option`].
#[derive(Debug, Clone)]
pub enum EngineOption {
    /// Switching mode also clears the current selection.
    RangeMode(bool),
    MinDate(Option<JalaliDate>),
    MaxDate(Option<JalaliDate>),
    DisabledDates(Option<DisabledDates>),
    HighlightedDates(Vec<HighlightedDate>),
    MaxRange(Option<u32>),
    OutputFormat(OutputFormat),
    NumeralType(NumeralType),
}

use crate::consts::{
    GREGORIAN_MONTH_NAMES, MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR, MONTH_NAMES,
    WEEKDAY_FULL_NAMES,
};
use crate::format::parse_date_string;
use crate::math;
use crate::prelude::*;
use crate::{CalendarError, CalendarResult, Jdn};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A Jalali calendar date.
///
/// Fields are public and plain: a literal or [`JalaliDate::from_ymd`] does no
/// checking, mirroring how callers hand raw triples to the engine. Use
/// [`JalaliDate::new`] or [`FromStr`] for validated construction.
///
/// Field order makes the derived `Ord` chronological for valid dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}/{:02}/{:02}", year, month, day)]
pub struct JalaliDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl JalaliDate {
    /// Creates a date, validating the year band, month and day of month.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` outside `MIN_YEAR..=MAX_YEAR`,
    /// `InvalidMonth` for months outside 1..=12 and `InvalidDay` for days the
    /// month does not have.
    pub fn new(year: i32, month: u8, day: u8) -> CalendarResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::InvalidYear(year));
        }
        if month == 0 || month > MAX_MONTH {
            return Err(CalendarError::InvalidMonth(month));
        }
        let max_day = math::jalaali_month_length(year, month)?;
        if day < MIN_DAY || day > max_day {
            return Err(CalendarError::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Creates a date without validation
    pub const fn from_ymd(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Julian Day Number of this date
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` when the year lies outside the breaks table.
    pub fn to_jdn(self) -> CalendarResult<Jdn> {
        math::j2d(self.year, self.month, self.day)
    }

    /// Date for a Julian Day Number
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` when the day is outside the supported years.
    pub fn from_jdn(jdn: Jdn) -> CalendarResult<Self> {
        math::d2j(jdn)
    }

    /// Same day in the Gregorian calendar
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` when the year lies outside the breaks table.
    pub fn to_gregorian(self) -> CalendarResult<GregorianDate> {
        math::to_gregorian(self.year, self.month, self.day)
    }

    /// Saturday-first weekday index (Saturday = 0, Friday = 6)
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` when the year lies outside the breaks table.
    pub fn weekday(self) -> CalendarResult<u8> {
        Ok(math::weekday_of_jdn(self.to_jdn()?))
    }

    /// Persian name of the month, or `None` for an out-of-range month
    pub fn month_name(self) -> Option<&'static str> {
        month_name(self.month)
    }

    /// Whether the year lies in the band the engine works in
    pub const fn is_in_supported_band(self) -> bool {
        self.year >= MIN_YEAR && self.year <= MAX_YEAR
    }

    /// Last day of this date's month
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` for Esfand of an unsupported year.
    pub fn month_length(self) -> CalendarResult<u8> {
        math::jalaali_month_length(self.year, self.month)
    }

}

impl FromStr for JalaliDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CalendarError::EmptyInput);
        }
        let parsed =
            parse_date_string(trimmed).ok_or_else(|| CalendarError::InvalidFormat(s.to_owned()))?;
        Self::new(parsed.year, parsed.month, parsed.day)
    }
}

impl Serialize for JalaliDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for JalaliDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Persian month name for a 1-based month number
pub fn month_name(month: u8) -> Option<&'static str> {
    MONTH_NAMES.get(usize::from(month).checked_sub(1)?).copied()
}

/// Full Persian weekday name for a Saturday-first index
pub fn weekday_name(day_of_week: u8) -> Option<&'static str> {
    WEEKDAY_FULL_NAMES.get(usize::from(day_of_week)).copied()
}

/// A proleptic Gregorian date, produced by conversion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{}-{:02}-{:02}", year, month, day)]
pub struct GregorianDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl GregorianDate {
    /// Creates a date without validation
    pub const fn from_ymd(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Converts a `chrono` calendar date
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_naive_date(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        // month() is 1..=12 and day() is 1..=31, both fit in u8
        Self::from_ymd(date.year(), date.month() as u8, date.day() as u8)
    }

    /// The equivalent `chrono` calendar date, if chrono can represent it
    pub fn to_naive_date(self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::from_ymd_opt(self.year, u32::from(self.month), u32::from(self.day))
    }

    /// Julian Day Number of this date
    pub fn to_jdn(self) -> Jdn {
        math::g2d(self.year, self.month, self.day)
    }

    /// Same day in the Jalali calendar
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` when the result is outside the supported years.
    pub fn to_jalali(self) -> CalendarResult<JalaliDate> {
        math::d2j(self.to_jdn())
    }

    /// English name of the month, or `None` for an out-of-range month
    pub fn month_name(self) -> Option<&'static str> {
        GREGORIAN_MONTH_NAMES
            .get(usize::from(self.month).checked_sub(1)?)
            .copied()
    }
}

/// Display granularity of the calendar.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

impl ViewMode {
    /// Next mode in the `day -> month -> year -> day` cycle
    pub const fn next(self) -> Self {
        match self {
            Self::Day => Self::Month,
            Self::Month => Self::Year,
            Self::Year => Self::Day,
        }
    }
}

impl FromStr for ViewMode {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(CalendarError::InvalidFormat(format!("unknown view mode: {other}"))),
        }
    }
}

/// Which calendar representations an emitted payload carries.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[display(fmt = "jalali")]
    Jalali,
    #[display(fmt = "gregorian")]
    Gregorian,
    #[default]
    #[display(fmt = "both")]
    Both,
}

impl OutputFormat {
    pub const fn includes_jalali(self) -> bool {
        matches!(self, Self::Jalali | Self::Both)
    }

    pub const fn includes_gregorian(self) -> bool {
        matches!(self, Self::Gregorian | Self::Both)
    }
}

impl FromStr for OutputFormat {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "jalali" => Ok(Self::Jalali),
            "gregorian" => Ok(Self::Gregorian),
            "both" => Ok(Self::Both),
            other => Err(CalendarError::InvalidFormat(format!("unknown output format: {other}"))),
        }
    }
}

/// Digit glyphs used when rendering numbers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NumeralType {
    #[default]
    #[display(fmt = "persian")]
    Persian,
    #[display(fmt = "latin")]
    Latin,
}

impl FromStr for NumeralType {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "persian" => Ok(Self::Persian),
            "latin" => Ok(Self::Latin),
            other => Err(CalendarError::InvalidFormat(format!("unknown numeral type: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::jd;

    #[test]
    fn test_new_valid() {
        assert!(JalaliDate::new(1403, 1, 31).is_ok());
        assert!(JalaliDate::new(1403, 7, 30).is_ok());
        assert!(JalaliDate::new(1403, 12, 30).is_ok(), "1403 is a leap year");
        assert!(JalaliDate::new(MIN_YEAR, 1, 1).is_ok());
        assert!(JalaliDate::new(MAX_YEAR, 1, 1).is_ok());
    }

    #[test]
    fn test_weekday_name() {
        assert_eq!(weekday_name(0), Some("شنبه"));
        assert_eq!(weekday_name(6), Some("جمعه"));
        assert_eq!(weekday_name(7), None);
        assert_eq!(jd(1403, 1, 1).weekday().ok().and_then(weekday_name), Some("چهارشنبه"));
    }

    #[test]
    fn test_new_invalid() {
        assert_eq!(JalaliDate::new(0, 1, 1), Err(CalendarError::InvalidYear(0)));
        assert_eq!(
            JalaliDate::new(MAX_YEAR + 1, 1, 1),
            Err(CalendarError::InvalidYear(MAX_YEAR + 1))
        );
        assert_eq!(JalaliDate::new(1403, 0, 1), Err(CalendarError::InvalidMonth(0)));
        assert_eq!(JalaliDate::new(1403, 13, 1), Err(CalendarError::InvalidMonth(13)));
        assert!(matches!(
            JalaliDate::new(1403, 7, 31),
            Err(CalendarError::InvalidDay { month: 7, day: 31, .. })
        ));
        assert!(matches!(
            JalaliDate::new(1402, 12, 30),
            Err(CalendarError::InvalidDay { year: 1402, .. })
        ));
        assert!(JalaliDate::new(1403, 1, 0).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(jd(1403, 1, 5).to_string(), "1403/01/05");
        assert_eq!(jd(99, 12, 29).to_string(), "99/12/29");
        assert_eq!(GregorianDate::from_ymd(2024, 3, 20).to_string(), "2024-03-20");
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(jd(1402, 12, 29) < jd(1403, 1, 1));
        assert!(jd(1403, 1, 31) < jd(1403, 2, 1));
        assert!(jd(1403, 2, 1) < jd(1403, 2, 2));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("1403/01/05".parse::<JalaliDate>(), Ok(jd(1403, 1, 5)));
        assert_eq!("۱۴۰۳-۰۱-۰۵".parse::<JalaliDate>(), Ok(jd(1403, 1, 5)));
        assert_eq!(" 1403.1.5 ".parse::<JalaliDate>(), Ok(jd(1403, 1, 5)));
        assert_eq!("".parse::<JalaliDate>(), Err(CalendarError::EmptyInput));
        assert!(matches!(
            "1403/01".parse::<JalaliDate>(),
            Err(CalendarError::InvalidFormat(_))
        ));
        assert_eq!("1403/13/01".parse::<JalaliDate>(), Err(CalendarError::InvalidMonth(13)));
    }

    #[test]
    fn test_serde() {
        let date = jd(1403, 1, 5);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""1403/01/05""#);
        let parsed: JalaliDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);

        let result: Result<JalaliDate, _> = serde_json::from_str(r#""1402/12/30""#);
        assert!(result.is_err(), "1402 has no Esfand 30");
    }

    #[test]
    fn test_conversions() {
        let date = jd(1403, 1, 1);
        let g = date.to_gregorian().unwrap();
        assert_eq!(g, GregorianDate::from_ymd(2024, 3, 20));
        assert_eq!(g.to_jalali().unwrap(), date);
        assert_eq!(date.weekday().unwrap(), 4);
        assert_eq!(JalaliDate::from_jdn(date.to_jdn().unwrap()).unwrap(), date);
        assert_eq!(
            g.to_naive_date(),
            chrono::NaiveDate::from_ymd_opt(2024, 3, 20)
        );
        assert_eq!(g.month_name(), Some("March"));
        assert_eq!(date.month_name(), Some("فروردین"));
        assert_eq!(jd(1403, 13, 1).month_name(), None);
        assert_eq!(jd(1403, 0, 1).month_name(), None);
    }

    #[test]
    fn test_view_mode_cycle() {
        assert_eq!(ViewMode::Day.next(), ViewMode::Month);
        assert_eq!(ViewMode::Month.next(), ViewMode::Year);
        assert_eq!(ViewMode::Year.next(), ViewMode::Day);
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(ViewMode::Month.to_string(), "month");
        assert_eq!("year".parse::<ViewMode>(), Ok(ViewMode::Year));
        assert_eq!(serde_json::to_string(&OutputFormat::Both).unwrap(), r#""both""#);
        assert_eq!("gregorian".parse::<OutputFormat>(), Ok(OutputFormat::Gregorian));
        assert_eq!(
            serde_json::from_str::<NumeralType>(r#""latin""#).unwrap(),
            NumeralType::Latin
        );
        assert!("roman".parse::<NumeralType>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Both);
        assert_eq!(NumeralType::default(), NumeralType::Persian);
    }
}

/// Minimum year the engine will display or select (inclusive)
pub const MIN_YEAR: i32 = 1;

/// Maximum year the engine will display or select (inclusive)
pub const MAX_YEAR: i32 = 3177;

/// Maximum valid month (Esfand)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for Farvardin
pub const FARVARDIN: u8 = 1;
/// Month number for Mehr, the first 30-day month
pub const MEHR: u8 = 7;
/// Month number for Esfand
pub const ESFAND: u8 = 12;

/// Days in each of the first six months
pub const FIRST_HALF_MONTH_DAYS: u8 = 31;
/// Days in months seven through eleven, and in Esfand of a leap year
pub const SECOND_HALF_MONTH_DAYS: u8 = 30;
/// Days in Esfand of a common year
pub const ESFAND_DAYS_COMMON: u8 = 29;

/// Days per week
pub const DAYS_IN_WEEK: u8 = 7;

/// Saturday-first weekday index of Friday, the weekly holiday
pub const FRIDAY: u8 = 6;

/// Number of years shown by the year grid
pub const YEAR_GRID_SIZE: i32 = 12;

/// How many years before the view year the year grid starts
pub const YEAR_GRID_LEAD: i32 = 5;

/// Jalali years at which the 33-year leap pattern resets.
///
/// The first entry is the lowest year the conversion supports; years at or
/// past the last entry are rejected.
pub(crate) const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Gregorian year offset of Jalali year zero
pub(crate) const GREGORIAN_YEAR_OFFSET: i32 = 621;

/// Jalali month names, Farvardin first
pub const MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Gregorian month names, January first
pub const GREGORIAN_MONTH_NAMES: [&str; 12] = [
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

/// Single-letter weekday labels, Saturday first
pub const WEEKDAY_NAMES: [&str; 7] = ["ش", "ی", "د", "س", "چ", "پ", "ج"];

/// Full weekday names, Saturday first
pub const WEEKDAY_FULL_NAMES: [&str; 7] = [
    "شنبه",
    "یکشنبه",
    "دوشنبه",
    "سه\u{200c}شنبه",
    "چهارشنبه",
    "پنجشنبه",
    "جمعه",
];

/// Persian digit glyphs, indexed by value
pub const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Jalali date component separator
pub const DATE_SEPARATOR: char = '/';
/// Separators accepted by the date parser
pub const ACCEPTED_SEPARATORS: [char; 3] = ['/', '-', '.'];
/// Separator between the two ends of a rendered range
pub const RANGE_ARROW: &str = "  ←  ";

/// Highlight tag used when a highlighted date carries no class of its own
pub const DEFAULT_HIGHLIGHT_CLASS: &str = "highlighted";

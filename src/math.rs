//! Jalali and Gregorian conversion through Julian Day Numbers.
//!
//! Every function here is pure. Division and remainder truncate toward zero
//! and the remainder keeps the sign of the dividend; Rust's `/` and `%` on
//! signed integers already behave that way, and the leap computation near
//! cycle boundaries depends on it (`rem_euclid`/`div_euclid` would corrupt it).
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::consts::{
    BREAKS, ESFAND_DAYS_COMMON, FIRST_HALF_MONTH_DAYS, GREGORIAN_YEAR_OFFSET, MAX_YEAR, MEHR,
    MIN_YEAR, SECOND_HALF_MONTH_DAYS,
};
use crate::types::{GregorianDate, JalaliDate};
use crate::{CalendarError, CalendarResult, Jdn};

/// Per-year anchor derived from the breaks table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct YearAnchor {
    leap: bool,
    /// Gregorian year in which the Jalali year begins.
    gregorian_year: i32,
    /// March day of that Gregorian year on which 1 Farvardin falls.
    march_day: u8,
}

const fn first_break() -> i32 {
    BREAKS[0]
}

const fn last_break() -> i32 {
    BREAKS[BREAKS.len() - 1]
}

fn year_anchor(jy: i32) -> CalendarResult<YearAnchor> {
    if jy < first_break() || jy >= last_break() {
        return Err(CalendarError::InvalidYear(jy));
    }
    Ok(year_anchor_unchecked(jy))
}

/// Walks the breaks table for `jy`. Callers must keep `first_break() <= jy <= last_break()`.
fn year_anchor_unchecked(jy: i32) -> YearAnchor {
    let gy = jy + GREGORIAN_YEAR_OFFSET;
    let mut leap_j = -14;
    let mut jp = first_break();
    let mut jump = 0;

    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / 33 * 8 + (jump % 33) / 4;
        jp = jm;
    }

    let mut n = jy - jp;
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gy / 4 - (gy / 100 + 1) * 3 / 4 - 150;
    let march_day = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    YearAnchor {
        leap: leap == 0,
        gregorian_year: gy,
        // 1 Farvardin always lands on March 20..=22
        march_day: march_day as u8,
    }
}

/// Returns whether `jy` is a Jalali leap year (Esfand has 30 days).
///
/// # Errors
/// Returns `CalendarError::InvalidYear` outside the breaks table (about -61..=3177).
pub fn is_leap_jalaali_year(jy: i32) -> CalendarResult<bool> {
    Ok(year_anchor(jy)?.leap)
}

/// Number of days in Jalali month `jm` of year `jy`.
///
/// # Errors
/// Returns `CalendarError::InvalidYear` when Esfand of an unsupported year is asked for.
pub fn jalaali_month_length(jy: i32, jm: u8) -> CalendarResult<u8> {
    if jm < MEHR {
        return Ok(FIRST_HALF_MONTH_DAYS);
    }
    if jm < crate::consts::ESFAND {
        return Ok(SECOND_HALF_MONTH_DAYS);
    }
    if is_leap_jalaali_year(jy)? {
        Ok(SECOND_HALF_MONTH_DAYS)
    } else {
        Ok(ESFAND_DAYS_COMMON)
    }
}

/// Jalali date to Julian Day Number.
///
/// Month and day are not range checked; out-of-range values overflow into
/// neighbouring months arithmetically.
///
/// # Errors
/// Returns `CalendarError::InvalidYear` when `jy` lies outside the breaks table.
pub fn j2d(jy: i32, jm: u8, jd: u8) -> CalendarResult<Jdn> {
    let anchor = year_anchor(jy)?;
    let jm = i64::from(jm);
    Ok(g2d(anchor.gregorian_year, 3, anchor.march_day)
        + (jm - 1) * 31
        - jm / 7 * (jm - 7)
        + i64::from(jd)
        - 1)
}

/// Julian Day Number to Jalali date.
///
/// # Errors
/// Returns `CalendarError::InvalidYear` when the day falls outside the supported years.
pub fn d2j(jdn: Jdn) -> CalendarResult<JalaliDate> {
    let gy = d2g(jdn).year;
    let mut jy = gy - GREGORIAN_YEAR_OFFSET;
    if jy < first_break() || jy > last_break() {
        return Err(CalendarError::InvalidYear(jy));
    }

    // The last break itself is only usable as an anchor for days that
    // precede its New Year and so belong to the final supported year.
    let anchor = year_anchor_unchecked(jy);
    let new_year = g2d(gy, 3, anchor.march_day);
    let mut k = jdn - new_year;

    if k >= 0 {
        if jy == last_break() {
            return Err(CalendarError::InvalidYear(jy));
        }
        if k <= 185 {
            return Ok(JalaliDate::from_ymd(jy, 1 + (k / 31) as u8, 1 + (k % 31) as u8));
        }
        k -= 186;
    } else {
        jy -= 1;
        k += 179;
        if is_leap_jalaali_year(jy)? {
            k += 1;
        }
    }

    Ok(JalaliDate::from_ymd(jy, MEHR + (k / 30) as u8, 1 + (k % 30) as u8))
}

/// Proleptic Gregorian date to Julian Day Number.
pub fn g2d(gy: i32, gm: u8, gd: u8) -> Jdn {
    let gy = i64::from(gy);
    let gm = i64::from(gm);
    let gd = i64::from(gd);
    let d = (gy + (gm - 8) / 6 + 100_100) * 1461 / 4 + (153 * ((gm + 9) % 12) + 2) / 5 + gd
        - 34_840_408;
    d - (gy + 100_100 + (gm - 8) / 6) / 100 * 3 / 4 + 752
}

/// Julian Day Number to proleptic Gregorian date.
pub fn d2g(jdn: Jdn) -> GregorianDate {
    let mut j = 4 * jdn + 139_361_631;
    j = j + (4 * jdn + 183_187_720) / 146_097 * 3 / 4 * 4 - 3908;
    let i = (j % 1461) / 4 * 5 + 308;
    let gd = (i % 153) / 5 + 1;
    let gm = (i / 153) % 12 + 1;
    let gy = j / 1461 - 100_100 + (8 - gm) / 6;
    GregorianDate::from_ymd(gy as i32, gm as u8, gd as u8)
}

/// Gregorian date to Jalali date.
///
/// # Errors
/// Returns `CalendarError::InvalidYear` when the result falls outside the supported years.
pub fn to_jalaali(gy: i32, gm: u8, gd: u8) -> CalendarResult<JalaliDate> {
    d2j(g2d(gy, gm, gd))
}

/// Jalali date to Gregorian date.
///
/// # Errors
/// Returns `CalendarError::InvalidYear` when `jy` lies outside the breaks table.
pub fn to_gregorian(jy: i32, jm: u8, jd: u8) -> CalendarResult<GregorianDate> {
    Ok(d2g(j2d(jy, jm, jd)?))
}

/// Today's date from the host clock, in the Jalali calendar.
///
/// # Errors
/// Returns `CalendarError::InvalidYear` if the host clock reports a date
/// outside the supported years.
pub fn today_jalaali() -> CalendarResult<JalaliDate> {
    GregorianDate::from_naive_date(chrono::Local::now().date_naive()).to_jalali()
}

/// Weekday index of a day in a Saturday-first week (Saturday = 0, Friday = 6).
pub fn weekday_of_jdn(jdn: Jdn) -> u8 {
    (jdn + 2).rem_euclid(7) as u8
}

/// First and last day the engine accepts, as Julian Day Numbers.
///
/// # Errors
/// Never fails for the built-in year band; the `Result` comes from the conversion.
pub fn supported_jdn_bounds() -> CalendarResult<(Jdn, Jdn)> {
    let first = j2d(MIN_YEAR, 1, 1)?;
    let last = j2d(
        MAX_YEAR,
        crate::consts::ESFAND,
        jalaali_month_length(MAX_YEAR, crate::consts::ESFAND)?,
    )?;
    Ok((first, last))
}

/// Moves `date` by `offset` days, or `None` when the result would leave
/// `MIN_YEAR/01/01..=MAX_YEAR/12/<last>`.
pub fn shift_days(date: JalaliDate, offset: i64) -> Option<JalaliDate> {
    let target = j2d(date.year, date.month, date.day).ok()? + offset;
    let (first, last) = supported_jdn_bounds().ok()?;
    if target < first || target > last {
        return None;
    }
    d2j(target).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::jd;

    #[test]
    fn test_known_conversions() {
        struct TestCase {
            gregorian: (i32, u8, u8),
            jalali: (i32, u8, u8),
            description: &'static str,
        }

        let cases = [
            TestCase {
                gregorian: (1981, 8, 17),
                jalali: (1360, 5, 26),
                description: "mid-year summer date",
            },
            TestCase {
                gregorian: (2013, 1, 10),
                jalali: (1391, 10, 21),
                description: "second half of year, previous Gregorian year",
            },
            TestCase {
                gregorian: (2014, 8, 4),
                jalali: (1393, 5, 13),
                description: "first half of year",
            },
            TestCase {
                gregorian: (2024, 3, 20),
                jalali: (1403, 1, 1),
                description: "Nowruz 1403",
            },
            TestCase {
                gregorian: (2024, 3, 19),
                jalali: (1402, 12, 29),
                description: "last day of common year 1402",
            },
            TestCase {
                gregorian: (2025, 3, 20),
                jalali: (1403, 12, 30),
                description: "leap day of 1403",
            },
        ];

        for case in &cases {
            let (gy, gm, gd) = case.gregorian;
            let (jy, jm, jday) = case.jalali;
            assert_eq!(
                to_jalaali(gy, gm, gd).unwrap(),
                jd(jy, jm, jday),
                "to_jalaali: {}",
                case.description
            );
            assert_eq!(
                to_gregorian(jy, jm, jday).unwrap(),
                GregorianDate::from_ymd(gy, gm, gd),
                "to_gregorian: {}",
                case.description
            );
        }
    }

    #[test]
    fn test_year_anchor_march_day() {
        struct TestCase {
            year:        i32,
            march_day:   u8,
            description: &'static str,
        }

        let cases = [
            TestCase { year: 1402, march_day: 21, description: "Nowruz 2023" },
            TestCase { year: 1403, march_day: 20, description: "Nowruz 2024" },
            TestCase { year: 1404, march_day: 21, description: "Nowruz 2025" },
            TestCase { year: 1, march_day: 22, description: "first supported year" },
        ];

        for case in &cases {
            let anchor = year_anchor(case.year).expect("year within breaks table");
            assert_eq!(anchor.march_day, case.march_day, "{}", case.description);
            assert_eq!(
                j2d(case.year, 1, 1),
                Ok(g2d(anchor.gregorian_year, 3, anchor.march_day)),
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_leap_years() {
        for year in [1354, 1358, 1362, 1366, 1370, 1375, 1379, 1383, 1387, 1391, 1395, 1399, 1403] {
            assert!(is_leap_jalaali_year(year).unwrap(), "{year} should be leap");
        }
        for year in [1371, 1393, 1394, 1396, 1400, 1401, 1402, 1404] {
            assert!(!is_leap_jalaali_year(year).unwrap(), "{year} should not be leap");
        }
    }

    #[test]
    fn test_month_lengths() {
        for month in 1..=6 {
            assert_eq!(jalaali_month_length(1402, month).unwrap(), 31);
        }
        for month in 7..=11 {
            assert_eq!(jalaali_month_length(1402, month).unwrap(), 30);
        }
        assert_eq!(jalaali_month_length(1393, 12).unwrap(), 29);
        assert_eq!(jalaali_month_length(1395, 12).unwrap(), 30);
    }

    #[test]
    fn test_invalid_years() {
        assert_eq!(is_leap_jalaali_year(-62), Err(CalendarError::InvalidYear(-62)));
        assert_eq!(is_leap_jalaali_year(3178), Err(CalendarError::InvalidYear(3178)));
        assert!(is_leap_jalaali_year(-61).is_ok());
        assert!(is_leap_jalaali_year(MAX_YEAR).is_ok());

        assert!(to_gregorian(-62, 1, 1).is_err());
        assert!(to_gregorian(MAX_YEAR + 1, 1, 1).is_err());
        // Esfand month length depends on leap status, so it fails too.
        assert!(jalaali_month_length(MAX_YEAR + 1, 12).is_err());
        // Other months never consult the table.
        assert_eq!(jalaali_month_length(MAX_YEAR + 1, 1), Ok(31));
    }

    #[test]
    fn test_last_supported_year_round_trips() {
        let last_day = jalaali_month_length(MAX_YEAR, 12).unwrap();
        let end = jd(MAX_YEAR, 12, last_day);
        let g = to_gregorian(end.year, end.month, end.day).unwrap();
        assert_eq!(to_jalaali(g.year, g.month, g.day).unwrap(), end);

        let after = j2d(end.year, end.month, end.day).unwrap() + 1;
        assert_eq!(d2j(after), Err(CalendarError::InvalidYear(MAX_YEAR + 1)));
    }

    #[test]
    fn test_gregorian_jdn() {
        // 2000-01-01 is JDN 2451545.
        assert_eq!(g2d(2000, 1, 1), 2_451_545);
        assert_eq!(d2g(2_451_545), GregorianDate::from_ymd(2000, 1, 1));
        assert_eq!(d2g(g2d(1900, 2, 28) + 1), GregorianDate::from_ymd(1900, 3, 1));
        assert_eq!(d2g(g2d(2000, 2, 28) + 1), GregorianDate::from_ymd(2000, 2, 29));
    }

    #[test]
    fn test_weekday() {
        // 2024-03-20 was a Wednesday: Saturday-first index 4.
        assert_eq!(weekday_of_jdn(g2d(2024, 3, 20)), 4);
        // 2024-03-22 was a Friday.
        assert_eq!(weekday_of_jdn(g2d(2024, 3, 22)), 6);
        // 2024-03-23 was a Saturday.
        assert_eq!(weekday_of_jdn(g2d(2024, 3, 23)), 0);
    }

    #[test]
    fn test_shift_days() {
        assert_eq!(shift_days(jd(1402, 12, 29), 1), Some(jd(1403, 1, 1)));
        assert_eq!(shift_days(jd(1403, 1, 1), -1), Some(jd(1402, 12, 29)));
        assert_eq!(shift_days(jd(1403, 1, 1), 7), Some(jd(1403, 1, 8)));
        assert_eq!(shift_days(jd(MIN_YEAR, 1, 1), -1), None);
        let last_day = jalaali_month_length(MAX_YEAR, 12).unwrap();
        assert_eq!(shift_days(jd(MAX_YEAR, 12, last_day), 1), None);
    }
}

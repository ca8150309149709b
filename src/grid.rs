//! Cell lists for the day, month and year views.

use serde::Serialize;
use tracing::trace;

use crate::consts::{
    DAYS_IN_WEEK, FARVARDIN, MAX_MONTH, MAX_YEAR, MIN_YEAR, MONTH_NAMES, YEAR_GRID_LEAD,
    YEAR_GRID_SIZE,
};
use crate::engine::CalendarEngine;
use crate::math;
use crate::types::JalaliDate;
use crate::CalendarResult;

/// One square of the day grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: JalaliDate,
    /// Saturday-first column, `0..7`.
    pub day_of_week: u8,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_range_start: bool,
    pub is_range_end: bool,
    pub is_in_range: bool,
    pub is_in_hover_range: bool,
    pub is_hover_range_end: bool,
    pub is_disabled: bool,
    pub is_weekend: bool,
    pub highlight_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCell {
    /// `1..=12`
    pub index: u8,
    pub name: &'static str,
    pub is_current: bool,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCell {
    pub year: i32,
    pub is_current: bool,
    pub is_selected: bool,
}

impl CalendarEngine {
    /// The day grid for the viewed month: trailing days of the previous
    /// month, the month itself, then leading days of the next month, in
    /// Saturday-first rows of seven.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` if a neighbouring month cannot be measured.
    pub fn days_of_month(&self) -> CalendarResult<Vec<DayCell>> {
        let (year, month) = (self.view_year(), self.view_month());
        let month_len = math::jalaali_month_length(year, month)?;
        let first_weekday = math::weekday_of_jdn(math::j2d(year, month, 1)?);

        let (prev_year, prev_month) = if month == FARVARDIN {
            (year - 1, MAX_MONTH)
        } else {
            (year, month - 1)
        };
        let (next_year, next_month) = if month == MAX_MONTH {
            (year + 1, FARVARDIN)
        } else {
            (year, month + 1)
        };
        let prev_len = math::jalaali_month_length(prev_year, prev_month)?;

        let mut cells = Vec::with_capacity(42);
        for back in (0..first_weekday).rev() {
            let day = prev_len - back;
            self.push_day(&mut cells, JalaliDate::from_ymd(prev_year, prev_month, day), false);
        }
        for day in 1..=month_len {
            self.push_day(&mut cells, JalaliDate::from_ymd(year, month, day), true);
        }
        let mut day = 1;
        while cells.len() % usize::from(DAYS_IN_WEEK) != 0 {
            self.push_day(&mut cells, JalaliDate::from_ymd(next_year, next_month, day), false);
            day += 1;
        }

        trace!(year, month, cells = cells.len(), "built day grid");
        Ok(cells)
    }

    fn push_day(&self, cells: &mut Vec<DayCell>, date: JalaliDate, is_current_month: bool) {
        #[allow(clippy::cast_possible_truncation)]
        let day_of_week = (cells.len() % usize::from(DAYS_IN_WEEK)) as u8;
        let JalaliDate { year, month, day } = date;
        cells.push(DayCell {
            date,
            day_of_week,
            is_current_month,
            is_today: self.is_today(year, month, day),
            is_selected: self.is_selected(year, month, day),
            is_range_start: self.is_range_start(year, month, day),
            is_range_end: self.is_range_end(year, month, day),
            is_in_range: self.is_in_range(year, month, day),
            is_in_hover_range: self.is_in_hover_range(year, month, day),
            is_hover_range_end: self.is_hover_range_end(year, month, day),
            is_disabled: self.is_disabled(year, month, day),
            is_weekend: Self::is_weekend(day_of_week),
            highlight_class: self.get_highlight_class(year, month, day).map(str::to_owned),
        });
    }

    /// The twelve months of the viewed year.
    pub fn months(&self) -> Vec<MonthCell> {
        let year = self.view_year();
        let today = self.today();
        let selected = self.selected_date();
        (FARVARDIN..=MAX_MONTH)
            .zip(MONTH_NAMES)
            .map(|(index, name)| MonthCell {
                index,
                name,
                is_current: today.year == year && today.month == index,
                is_selected: selected.is_some_and(|d| d.year == year && d.month == index),
            })
            .collect()
    }

    /// A page of twelve years around the viewed one, kept inside the supported band.
    pub fn years(&self) -> Vec<YearCell> {
        let mut start = (self.view_year() - YEAR_GRID_LEAD).max(MIN_YEAR);
        if start + YEAR_GRID_SIZE - 1 > MAX_YEAR {
            start = (MAX_YEAR - YEAR_GRID_SIZE + 1).max(MIN_YEAR);
        }
        let today = self.today();
        let selected = self.selected_date();
        trace!(start, "built year grid");
        (start..start + YEAR_GRID_SIZE)
            .map(|year| YearCell {
                year,
                is_current: today.year == year,
                is_selected: selected.is_some_and(|d| d.year == year),
            })
            .collect()
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{EngineOption, EngineOptions};
use crate::consts::{FARVARDIN, FRIDAY, MAX_MONTH, MAX_YEAR, MIN_YEAR, YEAR_GRID_SIZE};
use crate::events::{CalendarEvent, EventKind, Listeners, Subscription};
use crate::math;
use crate::payload::{DatePayload, build_date_payload};
use crate::range::{DateRange, Preset, RangeError, inclusive_span};
use crate::types::{JalaliDate, NumeralType, OutputFormat, ViewMode, month_name};
use crate::{CalendarResult, Jdn};

/// What a `viewChange` notification carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewInfo {
    pub year: i32,
    pub month: u8,
    pub month_name: String,
    pub view_mode: ViewMode,
}

/// The committed selection as payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SelectionValue {
    Single(DatePayload),
    Range { start: DatePayload, end: DatePayload },
}

/// View, selection and constraint state of one calendar widget.
///
/// Every operation runs to completion synchronously and either applies fully
/// or leaves the state untouched. Rejected interactions (disabled dates,
/// ranges longer than `max_range`) are silent: nothing changes and nothing
/// is emitted.
pub struct CalendarEngine {
    view_year:     i32,
    view_month:    u8,
    view_mode:     ViewMode,
    selected_date: Option<JalaliDate>,
    range_start:   Option<JalaliDate>,
    range_end:     Option<JalaliDate>,
    hover_date:    Option<JalaliDate>,
    today:         JalaliDate,
    options:       EngineOptions,
    listeners:     Listeners,
}

impl CalendarEngine {
    /// Creates an engine whose `today` is read from the host clock.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` if the host clock is outside the supported years.
    pub fn new(options: EngineOptions) -> CalendarResult<Self> {
        Ok(Self::with_today(options, math::today_jalaali()?))
    }

    /// Creates an engine with an explicit `today`.
    pub fn with_today(options: EngineOptions, today: JalaliDate) -> Self {
        let mut engine = Self {
            view_year: options.initial_year.unwrap_or(today.year),
            view_month: options.initial_month.unwrap_or(today.month),
            view_mode: ViewMode::Day,
            selected_date: None,
            range_start: None,
            range_end: None,
            hover_date: None,
            today,
            options,
            listeners: Listeners::default(),
        };
        engine.clamp_view();
        debug!(
            year = engine.view_year,
            month = engine.view_month,
            range_mode = engine.options.range_mode,
            "calendar engine created"
        );
        engine
    }

    // ── State access ──

    pub const fn view_year(&self) -> i32 {
        self.view_year
    }

    pub const fn view_month(&self) -> u8 {
        self.view_month
    }

    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub const fn selected_date(&self) -> Option<JalaliDate> {
        self.selected_date
    }

    pub const fn range_start(&self) -> Option<JalaliDate> {
        self.range_start
    }

    pub const fn range_end(&self) -> Option<JalaliDate> {
        self.range_end
    }

    pub const fn hover_date(&self) -> Option<JalaliDate> {
        self.hover_date
    }

    /// Today as sampled at construction; it does not roll over at midnight.
    pub const fn today(&self) -> JalaliDate {
        self.today
    }

    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub const fn range_mode(&self) -> bool {
        self.options.range_mode
    }

    pub const fn output_format(&self) -> OutputFormat {
        self.options.output_format
    }

    pub const fn numeral_type(&self) -> NumeralType {
        self.options.numeral_type
    }

    pub fn view_info(&self) -> ViewInfo {
        ViewInfo {
            year: self.view_year,
            month: self.view_month,
            month_name: month_name(self.view_month).unwrap_or_default().to_owned(),
            view_mode: self.view_mode,
        }
    }

    /// Both committed range ends, if a range is complete.
    pub fn committed_range(&self) -> Option<DateRange> {
        match (self.range_start, self.range_end) {
            (Some(start), Some(end)) => DateRange::new(start, end).ok(),
            _ => None,
        }
    }

    /// Payload of the committed selection in the configured output format.
    pub fn value(&self) -> Option<SelectionValue> {
        let format = self.options.output_format;
        if self.options.range_mode {
            let range = self.committed_range()?;
            Some(SelectionValue::Range {
                start: payload_for(range.start(), format).ok()?,
                end: payload_for(range.end(), format).ok()?,
            })
        } else {
            let date = self.selected_date?;
            payload_for(date, format).ok().map(SelectionValue::Single)
        }
    }

    // ── Notifications ──

    /// Registers `handler` for `kind`. Handlers run synchronously in
    /// registration order and see the engine read-only.
    pub fn on(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&CalendarEvent, &Self) + 'static,
    ) -> Subscription {
        self.listeners.add(kind, Box::new(handler))
    }

    /// Unregisters a listener. Returns `false` if it was already removed.
    pub fn off(&mut self, subscription: Subscription) -> bool {
        self.listeners.remove(&subscription)
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.count(kind)
    }

    /// Delivers `event` to every handler registered for its kind.
    pub fn emit(&mut self, event: CalendarEvent) {
        let kind = event.kind();
        let mut listeners = self.listeners.take(kind);
        for listener in &mut listeners {
            listener.call(&event, self);
        }
        self.listeners.restore(kind, listeners);
    }

    fn emit_view_change(&mut self) {
        let info = self.view_info();
        self.emit(CalendarEvent::ViewChange(info));
    }

    // ── Navigation ──

    pub fn go_to_next_month(&mut self) {
        if self.view_year == MAX_YEAR && self.view_month == MAX_MONTH {
            return;
        }
        if self.view_month == MAX_MONTH {
            self.view_month = FARVARDIN;
            self.view_year += 1;
        } else {
            self.view_month += 1;
        }
        self.view_changed();
    }

    pub fn go_to_prev_month(&mut self) {
        if self.view_year == MIN_YEAR && self.view_month == FARVARDIN {
            return;
        }
        if self.view_month == FARVARDIN {
            self.view_month = MAX_MONTH;
            self.view_year -= 1;
        } else {
            self.view_month -= 1;
        }
        self.view_changed();
    }

    pub fn go_to_next_year(&mut self) {
        if self.view_year == MAX_YEAR {
            return;
        }
        self.view_year += 1;
        self.view_changed();
    }

    pub fn go_to_prev_year(&mut self) {
        if self.view_year == MIN_YEAR {
            return;
        }
        self.view_year -= 1;
        self.view_changed();
    }

    /// Steps a full year-grid page forward, clamped to `MAX_YEAR`.
    pub fn go_to_next_decade(&mut self) {
        self.step_years(YEAR_GRID_SIZE);
    }

    /// Steps a full year-grid page back, clamped to `MIN_YEAR`.
    pub fn go_to_prev_decade(&mut self) {
        self.step_years(-YEAR_GRID_SIZE);
    }

    fn step_years(&mut self, delta: i32) {
        let before = self.view_year;
        self.view_year = self.view_year.saturating_add(delta);
        self.clamp_view();
        if self.view_year != before {
            self.view_changed();
        }
    }

    /// Shows today's month in day view and, outside range mode, selects
    /// today unless it is disabled.
    pub fn go_to_today(&mut self) {
        let today = self.today;
        self.view_year = today.year;
        self.view_month = today.month;
        self.view_mode = ViewMode::Day;
        self.clamp_view();

        if !self.options.range_mode && !self.is_disabled(today.year, today.month, today.day) {
            match payload_for(today, self.options.output_format) {
                Ok(payload) => {
                    self.selected_date = Some(today);
                    debug!(%today, "selected today");
                    self.emit(CalendarEvent::Select(payload));
                }
                Err(err) => warn!(error = %err, "cannot build payload for today"),
            }
        }
        self.emit_view_change();
    }

    /// Shows `year/month`, clamped into the supported band.
    pub fn go_to_date(&mut self, year: i32, month: u8) {
        self.view_year = year;
        self.view_month = month;
        self.view_changed();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        debug!(view_mode = %mode, "view mode set");
        self.emit_view_change();
    }

    /// Cycles `day -> month -> year -> day`.
    pub fn toggle_view_mode(&mut self) {
        self.set_view_mode(self.view_mode.next());
    }

    /// Moves `offset` days from `from`, bringing the target's month into
    /// view. Returns `None`, changing nothing, if the target would leave the
    /// supported band.
    pub fn focus_day_offset(&mut self, from: JalaliDate, offset: i64) -> Option<JalaliDate> {
        let target = math::shift_days(from, offset)?;
        if target.year != self.view_year || target.month != self.view_month {
            self.view_year = target.year;
            self.view_month = target.month;
            self.view_changed();
        }
        Some(target)
    }

    fn view_changed(&mut self) {
        self.clamp_view();
        debug!(
            year = self.view_year,
            month = self.view_month,
            view_mode = %self.view_mode,
            "view changed"
        );
        self.emit_view_change();
    }

    fn clamp_view(&mut self) {
        self.view_year = self.view_year.clamp(MIN_YEAR, MAX_YEAR);
        self.view_month = self.view_month.clamp(FARVARDIN, MAX_MONTH);
    }

    // ── Selection ──

    /// Picks a day. Outside range mode this commits it; in range mode it
    /// starts a new range or completes the open one.
    pub fn select_date(&mut self, year: i32, month: u8, day: u8) {
        if self.is_disabled(year, month, day) {
            debug!(year, month, day, "ignoring disabled date");
            return;
        }
        let date = JalaliDate::from_ymd(year, month, day);
        if self.options.range_mode {
            match (self.range_start, self.range_end) {
                (Some(start), None) => self.complete_range(start, date),
                _ => self.begin_range(date),
            }
        } else {
            self.select_single(date);
        }
    }

    fn select_single(&mut self, date: JalaliDate) {
        let payload = match payload_for(date, self.options.output_format) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, %date, "cannot build payload, selection dropped");
                return;
            }
        };
        self.selected_date = Some(date);
        self.view_year = date.year;
        self.view_month = date.month;
        self.clamp_view();
        debug!(%date, "date selected");
        self.emit(CalendarEvent::Select(payload));
    }

    fn begin_range(&mut self, date: JalaliDate) {
        let payload = match payload_for(date, self.options.output_format) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, %date, "cannot build payload, range start dropped");
                return;
            }
        };
        self.range_start = Some(date);
        self.range_end = None;
        debug!(%date, "range started");
        self.emit(CalendarEvent::RangeStart(payload));
    }

    fn complete_range(&mut self, start: JalaliDate, date: JalaliDate) {
        match inclusive_span(start, date) {
            Ok(span) if self.exceeds_max_range(span) => {
                debug!(%start, end = %date, span, "range longer than max_range ignored");
            }
            Ok(_) => match DateRange::ordered(start, date) {
                Ok(range) => {
                    let _committed = self.commit_range(range);
                },
                Err(err) => warn!(error = %err, "cannot order range ends"),
            },
            Err(err) => warn!(error = %err, "cannot measure range"),
        }
    }

    fn exceeds_max_range(&self, span: Jdn) -> bool {
        self.options
            .max_range
            .filter(|&max| max > 0)
            .is_some_and(|max| span > Jdn::from(max))
    }

    /// Stores `range` as the committed range and publishes it. Nothing is
    /// stored if either payload cannot be built.
    fn commit_range(&mut self, range: DateRange) -> bool {
        let format = self.options.output_format;
        let start = payload_for(range.start(), format);
        let end = payload_for(range.end(), format);
        let (start, end) = match (start, end) {
            (Ok(start), Ok(end)) => (start, end),
            (Err(err), _) | (_, Err(err)) => {
                warn!(error = %err, %range, "cannot build range payloads");
                return false;
            }
        };
        self.range_start = Some(range.start());
        self.range_end = Some(range.end());
        self.hover_date = None;
        debug!(%range, "range committed");
        self.emit(CalendarEvent::RangeSelect { start, end });
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected_date = None;
        self.range_start = None;
        self.range_end = None;
        debug!("selection cleared");
        self.emit(CalendarEvent::Clear);
    }

    /// Sets or clears the transient day under the pointer used for the range preview.
    pub fn set_hover_date(&mut self, date: Option<JalaliDate>) {
        self.hover_date = date;
    }

    /// Parses a typed `Y/MM/DD` (either digit set, `/`, `-` or `.`
    /// separators) and selects it. Incomplete or invalid input is ignored
    /// and `false` returned.
    pub fn select_typed_date(&mut self, input: &str) -> bool {
        let Ok(date) = input.parse::<JalaliDate>() else {
            return false;
        };
        self.view_year = date.year;
        self.view_month = date.month;
        self.select_date(date.year, date.month, date.day);
        true
    }

    // ── Presets ──

    /// Computes a named range relative to today without touching state.
    ///
    /// # Errors
    /// Returns `RangeError::Calendar` if a bound falls outside the supported years.
    pub fn get_preset_range(&self, preset: Preset) -> Result<DateRange, RangeError> {
        let today = self.today;
        let today_jdn = today.to_jdn()?;
        match preset {
            Preset::ThisWeek => {
                let offset = Jdn::from(math::weekday_of_jdn(today_jdn));
                let (first_supported, _) = math::supported_jdn_bounds()?;
                let start = (today_jdn - offset).max(first_supported);
                DateRange::new(math::d2j(start)?, math::d2j(today_jdn - offset + 6)?)
            },
            Preset::ThisMonth => {
                let last = today.month_length()?;
                DateRange::new(
                    JalaliDate::from_ymd(today.year, today.month, 1),
                    JalaliDate::from_ymd(today.year, today.month, last),
                )
            },
            Preset::Last7 => DateRange::new(math::d2j(today_jdn - 6)?, today),
            Preset::Last30 => DateRange::new(math::d2j(today_jdn - 29)?, today),
        }
    }

    /// Commits a preset as the current range, subject to `max_range`.
    pub fn apply_preset(&mut self, preset: Preset) {
        let range = match self.get_preset_range(preset) {
            Ok(range) => range,
            Err(err) => {
                warn!(error = %err, %preset, "cannot compute preset range");
                return;
            }
        };
        match range.span_days() {
            Ok(span) if self.exceeds_max_range(span) => {
                debug!(%preset, span, "preset longer than max_range ignored");
                return;
            }
            Ok(_) => {},
            Err(err) => {
                warn!(error = %err, %preset, "cannot measure preset range");
                return;
            }
        }
        if self.commit_range(range) {
            self.emit_view_change();
        }
    }

    // ── Options ──

    pub fn set_option(&mut self, option: EngineOption) {
        debug!(?option, "option changed");
        match option {
            EngineOption::RangeMode(range_mode) => {
                self.options.range_mode = range_mode;
                self.clear_selection();
            },
            EngineOption::MinDate(date) => self.options.min_date = date,
            EngineOption::MaxDate(date) => self.options.max_date = date,
            EngineOption::DisabledDates(disabled) => self.options.disabled_dates = disabled,
            EngineOption::HighlightedDates(dates) => self.options.highlighted_dates = dates,
            EngineOption::MaxRange(days) => self.options.max_range = days.filter(|&d| d > 0),
            EngineOption::OutputFormat(format) => self.options.output_format = format,
            EngineOption::NumeralType(numeral_type) => self.options.numeral_type = numeral_type,
        }
    }

    // ── Queries ──

    /// Whether a day may not be picked: outside the supported years, before
    /// `min_date`, after `max_date`, or matched by `disabled_dates`.
    pub fn is_disabled(&self, year: i32, month: u8, day: u8) -> bool {
        let date = JalaliDate::from_ymd(year, month, day);
        if !date.is_in_supported_band() {
            return true;
        }
        let Ok(jdn) = date.to_jdn() else {
            return true;
        };
        if self.options.min_date.and_then(jdn_of).is_some_and(|min| jdn < min) {
            return true;
        }
        if self.options.max_date.and_then(jdn_of).is_some_and(|max| jdn > max) {
            return true;
        }
        self.options
            .disabled_dates
            .as_ref()
            .is_some_and(|disabled| disabled.contains(date))
    }

    /// Visual tag of a highlighted day, `None` if it is not highlighted.
    pub fn get_highlight_class(&self, year: i32, month: u8, day: u8) -> Option<&str> {
        let date = JalaliDate::from_ymd(year, month, day);
        self.options
            .highlighted_dates
            .iter()
            .find(|h| h.date == date)
            .map(crate::config::HighlightedDate::class)
    }

    pub fn is_today(&self, year: i32, month: u8, day: u8) -> bool {
        self.today == JalaliDate::from_ymd(year, month, day)
    }

    /// In range mode, whether the day is either committed end; otherwise
    /// whether it is the selected date.
    pub fn is_selected(&self, year: i32, month: u8, day: u8) -> bool {
        if self.options.range_mode {
            return self.is_range_start(year, month, day) || self.is_range_end(year, month, day);
        }
        self.selected_date == Some(JalaliDate::from_ymd(year, month, day))
    }

    pub fn is_range_start(&self, year: i32, month: u8, day: u8) -> bool {
        self.range_start == Some(JalaliDate::from_ymd(year, month, day))
    }

    pub fn is_range_end(&self, year: i32, month: u8, day: u8) -> bool {
        self.range_end == Some(JalaliDate::from_ymd(year, month, day))
    }

    /// Strictly between the committed range ends.
    pub fn is_in_range(&self, year: i32, month: u8, day: u8) -> bool {
        let (Some(start), Some(end)) = (self.range_start, self.range_end) else {
            return false;
        };
        strictly_between(JalaliDate::from_ymd(year, month, day), start, end)
    }

    /// Strictly between the open range start and the hovered day, while no
    /// end is committed.
    pub fn is_in_hover_range(&self, year: i32, month: u8, day: u8) -> bool {
        let (Some(start), None, Some(hover)) = (self.range_start, self.range_end, self.hover_date)
        else {
            return false;
        };
        strictly_between(JalaliDate::from_ymd(year, month, day), start, hover)
    }

    pub fn is_hover_range_end(&self, year: i32, month: u8, day: u8) -> bool {
        self.range_start.is_some()
            && self.range_end.is_none()
            && self.hover_date == Some(JalaliDate::from_ymd(year, month, day))
    }

    /// Friday, the last column of a Saturday-first week.
    pub const fn is_weekend(day_of_week: u8) -> bool {
        day_of_week == FRIDAY
    }
}

impl fmt::Debug for CalendarEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarEngine")
            .field("view_year", &self.view_year)
            .field("view_month", &self.view_month)
            .field("view_mode", &self.view_mode)
            .field("selected_date", &self.selected_date)
            .field("range_start", &self.range_start)
            .field("range_end", &self.range_end)
            .field("hover_date", &self.hover_date)
            .field("today", &self.today)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn jdn_of(date: JalaliDate) -> Option<Jdn> {
    date.to_jdn().ok()
}

fn payload_for(date: JalaliDate, format: OutputFormat) -> CalendarResult<DatePayload> {
    build_date_payload(date.year, date.month, date.day, format)
}

/// Whether `date` lies strictly between `a` and `b`, in either order.
fn strictly_between(date: JalaliDate, a: JalaliDate, b: JalaliDate) -> bool {
    match (jdn_of(date), jdn_of(a), jdn_of(b)) {
        (Some(day), Some(a), Some(b)) => day > a.min(b) && day < a.max(b),
        _ => false,
    }
}

use jalali_engine::{
    CalendarEngine, EngineOptions, HighlightedDate, JalaliDate, MAX_YEAR, MIN_YEAR,
};

fn engine_at(year: i32, month: u8) -> CalendarEngine {
    CalendarEngine::with_today(
        EngineOptions::default().with_initial_view(year, month),
        JalaliDate::from_ymd(1403, 1, 15),
    )
}

#[test]
fn every_month_fills_whole_weeks() {
    for year in [1, 1399, 1402, 1403, 1404, MAX_YEAR] {
        for month in 1..=12 {
            let engine = engine_at(year, month);
            let cells = engine.days_of_month().unwrap();
            let current = cells.iter().filter(|c| c.is_current_month).count();
            let expected = JalaliDate::from_ymd(year, month, 1).month_length().unwrap();

            assert_eq!(cells.len() % 7, 0, "{year}/{month}");
            assert!(cells.len() <= 42, "{year}/{month}");
            assert_eq!(current, usize::from(expected), "{year}/{month}");
            for (i, cell) in cells.iter().enumerate() {
                assert_eq!(usize::from(cell.day_of_week), i % 7);
            }
        }
    }
}

#[test]
fn first_day_lands_on_its_weekday() {
    let engine = engine_at(1403, 7);
    let cells = engine.days_of_month().unwrap();
    let first = cells.iter().find(|c| c.is_current_month).unwrap();
    assert_eq!(first.date, JalaliDate::from_ymd(1403, 7, 1));
    assert_eq!(Ok(first.day_of_week), first.date.weekday());
}

#[test]
fn days_outside_supported_years_are_disabled() {
    let engine = engine_at(MIN_YEAR, 1);
    let cells = engine.days_of_month().unwrap();
    for cell in cells.iter().filter(|c| c.date.year < MIN_YEAR) {
        assert!(cell.is_disabled, "{}", cell.date);
    }

    let engine = engine_at(MAX_YEAR, 12);
    let cells = engine.days_of_month().unwrap();
    for cell in cells.iter().filter(|c| c.date.year > MAX_YEAR) {
        assert!(cell.is_disabled, "{}", cell.date);
    }
}

#[test]
fn cells_reflect_range_and_highlights() {
    let mut engine = CalendarEngine::with_today(
        EngineOptions::default()
            .with_range_mode(true)
            .with_highlighted_dates(vec![
                HighlightedDate::new(JalaliDate::from_ymd(1403, 1, 13)).with_class("holiday"),
            ]),
        JalaliDate::from_ymd(1403, 1, 15),
    );
    engine.select_date(1403, 1, 10);
    engine.select_date(1403, 1, 12);

    let cells = engine.days_of_month().unwrap();
    let cell = |day: u8| {
        cells
            .iter()
            .find(|c| c.is_current_month && c.date.day == day)
            .unwrap()
    };
    assert!(cell(10).is_range_start && cell(10).is_selected);
    assert!(cell(11).is_in_range && !cell(11).is_selected);
    assert!(cell(12).is_range_end);
    assert_eq!(cell(13).highlight_class.as_deref(), Some("holiday"));
    assert!(cell(15).is_today);
}

#[test]
fn hover_preview_cells() {
    let mut engine = CalendarEngine::with_today(
        EngineOptions::default().with_range_mode(true),
        JalaliDate::from_ymd(1403, 1, 15),
    );
    engine.select_date(1403, 1, 20);
    engine.set_hover_date(Some(JalaliDate::from_ymd(1403, 1, 16)));

    let cells = engine.days_of_month().unwrap();
    let hovered: Vec<u8> = cells
        .iter()
        .filter(|c| c.is_current_month && c.is_in_hover_range)
        .map(|c| c.date.day)
        .collect();
    assert_eq!(hovered, vec![17, 18, 19]);
    assert!(cells.iter().any(|c| c.is_hover_range_end && c.date.day == 16));
}

#[test]
fn year_page_is_always_twelve_wide() {
    for year in [MIN_YEAR, 2, 6, 1403, MAX_YEAR - 3, MAX_YEAR] {
        let years = engine_at(year, 1).years();
        assert_eq!(years.len(), 12);
        assert!(years[0].year >= MIN_YEAR);
        assert!(years[11].year <= MAX_YEAR);
        assert!(years.iter().any(|y| y.year == year), "{year}");
    }
}

#[test]
fn day_cells_serialize_camel_case() {
    let engine = engine_at(1403, 1);
    let cells = engine.days_of_month().unwrap();
    let json = serde_json::to_value(&cells[18]).unwrap();
    assert_eq!(json["date"], "1403/01/15");
    assert_eq!(json["isToday"], true);
    assert_eq!(json["dayOfWeek"], 4);
    assert_eq!(json["highlightClass"], serde_json::Value::Null);
}

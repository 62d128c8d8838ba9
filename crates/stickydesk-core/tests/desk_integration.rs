//! Integration tests for the desk as a whole.
//!
//! These tests drive a `Desk` the way a front end would and check what lands
//! in the two documents on disk.

use std::sync::Arc;

use chrono::NaiveDate;
use stickydesk_core::{
    week_start, AppConfig, AppData, DateKey, Desk, Event, FixedClock, HexColor, JsonStore,
    MonthCursor, Phase, PlanKind, PlanWrite, Position, StorePaths, TimerState, WidgetName,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn open_on(dir: &tempfile::TempDir, today: NaiveDate) -> (Desk, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(today));
    let desk = Desk::open_with_clock(&StorePaths::in_dir(dir.path()), clock.clone());
    (desk, clock)
}

#[test]
fn test_fresh_store_resolves_builtin_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (desk, _) = open_on(&dir, date(2024, 6, 12));

    let pomodoro = desk.widget(WidgetName::Pomodoro);
    assert_eq!(pomodoro.color.as_str(), "#FFF0F5");
    assert_eq!(pomodoro.position, Position { x: 100, y: 100 });
    assert_eq!((pomodoro.size.width, pomodoro.size.height), (300, 220));
    assert!(!pomodoro.expanded);

    assert_eq!(desk.widget(WidgetName::MonthlyPlanner).size.width, 650);
}

#[test]
fn test_populated_document_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let day = DateKey::new(date(2024, 6, 12));
    {
        let (mut desk, _) = open_on(&dir, day.date());
        desk.add_event(day, "Dentist");
        desk.todo_add("Buy milk");
        desk.todo_toggle(0);
        desk.set_day_plan(day.at_hour(14).unwrap(), "Review");
        desk.set_plan(PlanKind::Weekly, day, "Gym");
        desk.set_color(WidgetName::Calendar, HexColor::parse("#123456").unwrap());
        desk.set_expanded(WidgetName::DayPlanner, true);
    }

    let paths = StorePaths::in_dir(dir.path());
    let first: AppData = JsonStore::new(&paths.data).load();
    JsonStore::new(&paths.data).save(&first).unwrap();
    let second: AppData = JsonStore::new(&paths.data).load();
    assert_eq!(first, second);

    let (desk, _) = open_on(&dir, day.date());
    assert_eq!(desk.events(day), ["Dentist"]);
    assert!(desk.todos()[0].done);
    assert_eq!(desk.day_plan(day.at_hour(14).unwrap()), "Review");
    assert_eq!(desk.plan(PlanKind::Weekly, day), "Gym");
    assert_eq!(desk.plan(PlanKind::Monthly, day), "");
    assert_eq!(desk.widget(WidgetName::Calendar).color.as_str(), "#123456");
    assert!(desk.widget(WidgetName::DayPlanner).expanded);
}

#[test]
fn test_removing_absent_entries_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let day = DateKey::new(date(2024, 6, 12));
    let (mut desk, _) = open_on(&dir, day.date());

    assert_eq!(desk.remove_event(day, 0), None);
    assert_eq!(desk.clear_events(day), 0);
    assert_eq!(desk.set_plan(PlanKind::Monthly, day, "   "), PlanWrite::Unchanged);
    assert_eq!(desk.set_day_plan(day.at_hour(9).unwrap(), ""), PlanWrite::Unchanged);
    assert!(desk.todo_delete(3).is_none());
}

#[test]
fn test_month_and_week_navigation() {
    let december = MonthCursor::containing(date(2024, 12, 15));
    let next = december.next();
    assert_eq!((next.year, next.month), (2025, 1));

    let january = MonthCursor::containing(date(2025, 1, 31));
    let prev = january.prev();
    assert_eq!((prev.year, prev.month), (2024, 12));

    assert_eq!(week_start(date(2024, 6, 12)), date(2024, 6, 10));
}

#[test]
fn test_day_plan_key_format_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let (mut desk, _) = open_on(&dir, date(2024, 6, 1));
    let key = DateKey::new(date(2024, 6, 1)).at_hour(9).unwrap();
    assert_eq!(key.to_string(), "2024-06-01_9");

    desk.set_day_plan(key, "Standup");
    let data: AppData = JsonStore::new(StorePaths::in_dir(dir.path()).data).load();
    assert_eq!(data.day_plans.get("2024-06-01_9".parse().unwrap()), "Standup");

    desk.set_day_plan(key, "");
    assert_eq!(desk.day_plan(key), "");
    assert!(!desk.data().day_plans.contains_key(key));
}

#[test]
fn test_focus_phase_of_one_minute() {
    let dir = tempfile::tempdir().unwrap();
    let (mut desk, _) = open_on(&dir, date(2024, 6, 12));
    desk.pomodoro_update_settings(1, 3).unwrap();
    let before = desk.sessions_today();

    desk.pomodoro_start();
    for _ in 0..60 {
        desk.pomodoro_tick();
    }

    assert_eq!(desk.pomodoro().phase(), Phase::Break);
    assert_eq!(desk.pomodoro().time_left(), 3 * 60);
    assert_eq!(desk.sessions_today(), before + 1);
    assert_eq!(desk.pomodoro().state(), TimerState::PausedBreak);
}

#[test]
fn test_settings_validation_and_idle_reload() {
    let dir = tempfile::tempdir().unwrap();
    let (mut desk, _) = open_on(&dir, date(2024, 6, 12));
    desk.pomodoro_update_settings(40, 5).unwrap();

    assert!(desk.pomodoro_update_settings(0, 5).is_err());
    assert_eq!(desk.pomodoro().settings().focus_minutes, 40);
    assert_eq!(desk.pomodoro().time_left(), 40 * 60);

    desk.pomodoro_update_settings(25, 5).unwrap();
    assert_eq!(desk.pomodoro().time_left(), 25 * 60);
}

#[test]
fn test_todo_positional_delete() {
    let dir = tempfile::tempdir().unwrap();
    let (mut desk, _) = open_on(&dir, date(2024, 6, 12));
    desk.todo_add("a");
    desk.todo_add("b");
    desk.todo_delete(0);

    let texts: Vec<&str> = desk.todos().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, ["b"]);
}

#[test]
fn test_session_after_midnight_counts_toward_new_day() {
    let dir = tempfile::tempdir().unwrap();
    let (mut desk, clock) = open_on(&dir, date(2024, 6, 12));
    desk.pomodoro_update_settings(1, 5).unwrap();
    desk.pomodoro_start();
    for _ in 0..30 {
        desk.pomodoro_tick();
    }

    clock.set(date(2024, 6, 13));
    for _ in 0..30 {
        desk.pomodoro_tick();
    }

    let history = &desk.data().pomodoro_history;
    assert_eq!(history.count(DateKey::new(date(2024, 6, 12))), 0);
    assert_eq!(history.count(DateKey::new(date(2024, 6, 13))), 1);
}

#[test]
fn test_corrupt_config_is_replaced_on_next_save() {
    let dir = tempfile::tempdir().unwrap();
    let paths = StorePaths::in_dir(dir.path());
    std::fs::write(&paths.config, "{\"colors\": ").unwrap();

    let (mut desk, _) = open_on(&dir, date(2024, 6, 12));
    assert_eq!(desk.widget(WidgetName::Todo), WidgetName::Todo.defaults());

    desk.set_position(WidgetName::Todo, Position { x: 1, y: 2 });
    let config: AppConfig = JsonStore::new(&paths.config).read().unwrap().unwrap();
    assert_eq!(config.widget(WidgetName::Todo).position, Position { x: 1, y: 2 });
}

#[test]
fn test_legacy_and_partial_documents() {
    let dir = tempfile::tempdir().unwrap();
    let paths = StorePaths::in_dir(dir.path());
    std::fs::write(
        &paths.data,
        r#"{
            "todos": [{"text": "carry over"}],
            "pomodoro_settings": {"focus": 45, "break": 15},
            "calendar_events": {"not-a-date": ["x"], "2024-06-12": ["kept"]}
        }"#,
    )
    .unwrap();

    let (mut desk, _) = open_on(&dir, date(2024, 6, 12));
    assert_eq!(desk.pomodoro().settings().focus_minutes, 45);
    assert_eq!(desk.pomodoro().time_left(), 45 * 60);
    assert!(!desk.todos()[0].done);
    assert_eq!(desk.events(DateKey::new(date(2024, 6, 12))), ["kept"]);
    assert_eq!(desk.data().calendar_events.len(), 1);
    assert!(desk.data().weekly_plans.is_empty());
}

#[test]
fn test_snapshot_follows_date_rollover_without_completion() {
    let dir = tempfile::tempdir().unwrap();
    let (mut desk, clock) = open_on(&dir, date(2024, 6, 12));
    desk.pomodoro_skip();
    desk.pomodoro_reset();
    assert_eq!(desk.pomodoro().sessions_today(), 1);

    clock.set(date(2024, 6, 13));
    assert_eq!(desk.sessions_today(), 0);
    assert_eq!(desk.pomodoro().sessions_today(), 0);
    match desk.pomodoro().snapshot() {
        Event::StateSnapshot { sessions_today, .. } => assert_eq!(sessions_today, 0),
        other => panic!("unexpected event: {other:?}"),
    }
    match desk.pomodoro_start() {
        Some(Event::TimerStarted { .. }) => {}
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(desk.pomodoro().sessions_today(), 0);
}

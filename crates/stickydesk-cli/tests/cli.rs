//! CLI end-to-end tests.
//!
//! Each test drives the built binary against its own temporary data
//! directory and checks both the output and the documents on disk.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

/// Run the CLI against `dir` and return (code, stdout, stderr).
fn run_cli(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_stickydesk"))
        .env("STICKYDESK_DATA_DIR", dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_ok(dir: &Path, args: &[&str]) -> String {
    let (code, stdout, stderr) = run_cli(dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    serde_json::from_str(&run_ok(dir, args)).expect("Failed to parse JSON output")
}

fn data_file(dir: &Path) -> Value {
    let raw = std::fs::read_to_string(dir.join("desktop_widgets_data.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn config_file(dir: &Path) -> Value {
    let raw = std::fs::read_to_string(dir.join("desktop_widgets_config.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_calendar_add_list_remove() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();

    run_ok(d, &["calendar", "add", "Dentist", "--date", "2024-06-12"]);
    run_ok(d, &["calendar", "add", "Lunch", "--date", "2024-06-12"]);

    let listed = run_json(d, &["calendar", "list", "--date", "2024-06-12"]);
    assert_eq!(listed["events"], serde_json::json!(["Dentist", "Lunch"]));

    let out = run_ok(d, &["calendar", "remove", "1", "--date", "2024-06-12"]);
    assert!(out.contains("Dentist"));
    assert_eq!(
        data_file(d)["calendar_events"]["2024-06-12"],
        serde_json::json!(["Lunch"])
    );

    run_ok(d, &["calendar", "remove", "1", "--date", "2024-06-12"]);
    assert!(data_file(d)["calendar_events"].get("2024-06-12").is_none());
}

#[test]
fn test_calendar_remove_out_of_range_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["calendar", "remove", "3", "--date", "2024-06-12"]);
    assert!(out.contains("No event #3"));
    assert!(!dir.path().join("desktop_widgets_data.json").exists());
}

#[test]
fn test_calendar_rejects_bad_date() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["calendar", "list", "--date", "2024-6-1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid date"));
}

#[test]
fn test_calendar_month_grid() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    run_ok(d, &["calendar", "add", "Party", "--date", "2024-02-29"]);

    let view = run_json(d, &["calendar", "month", "--year", "2024", "--month", "2"]);
    assert_eq!(view["label"], "February 2024");
    let weeks = view["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 5);
    // Feb 1 2024 is a Thursday.
    assert!(weeks[0][2].is_null());
    assert_eq!(weeks[0][3]["day"], 1);
    assert_eq!(weeks[4][3]["day"], 29);
    assert_eq!(weeks[4][3]["events"], 1);
}

#[test]
fn test_todo_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();

    run_ok(d, &["todo", "add", "a"]);
    run_ok(d, &["todo", "add", "b"]);
    run_ok(d, &["todo", "add", "   "]);
    run_ok(d, &["todo", "toggle", "2"]);

    let listed = run_json(d, &["todo", "list"]);
    assert_eq!(listed["total"], 2);
    assert_eq!(listed["done"], 1);
    assert_eq!(listed["items"][1]["number"], 2);
    assert_eq!(listed["items"][1]["done"], true);

    run_ok(d, &["todo", "clear-done"]);
    assert_eq!(
        data_file(d)["todos"],
        serde_json::json!([{ "text": "a", "done": false }])
    );

    let out = run_ok(d, &["todo", "delete", "5"]);
    assert!(out.contains("No item #5"));
    run_ok(d, &["todo", "clear-all"]);
    assert_eq!(data_file(d)["todos"], serde_json::json!([]));
}

#[test]
fn test_day_plan_set_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();

    run_ok(d, &["plan", "day", "set", "9", "Standup", "--date", "2024-06-01"]);
    assert_eq!(data_file(d)["day_plans"]["2024-06-01_9"], "Standup");

    let shown = run_json(d, &["plan", "day", "show", "--date", "2024-06-01"]);
    let hours = shown["hours"].as_array().unwrap();
    assert_eq!(hours.len(), 13);
    assert_eq!(hours[2]["hour"], 9);
    assert_eq!(hours[2]["text"], "Standup");

    run_ok(d, &["plan", "day", "set", "9", "", "--date", "2024-06-01"]);
    assert!(data_file(d)["day_plans"].get("2024-06-01_9").is_none());
}

#[test]
fn test_day_plan_rejects_bad_hour() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["plan", "day", "set", "24", "Late"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid hour"));
}

#[test]
fn test_week_show_spans_monday_to_sunday() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    run_ok(d, &["plan", "week", "set", "Gym", "--date", "2024-06-12"]);

    let week = run_json(d, &["plan", "week", "show", "--date", "2024-06-12"]);
    let days = week["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], "2024-06-10");
    assert_eq!(days[0]["weekday"], "Mon");
    assert_eq!(days[2]["text"], "Gym");
    assert_eq!(days[6]["date"], "2024-06-16");
}

#[test]
fn test_month_plans_are_separate_from_week_plans() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    run_ok(d, &["plan", "month", "set", "Rent", "--date", "2024-06-01"]);

    assert_eq!(run_ok(d, &["plan", "month", "get", "--date", "2024-06-01"]).trim(), "Rent");
    assert_eq!(run_ok(d, &["plan", "week", "get", "--date", "2024-06-01"]).trim(), "");

    let month = run_json(d, &["plan", "month", "show", "--year", "2024", "--month", "6"]);
    assert_eq!(month["title"], "June 2024");
    assert_eq!(month["days"].as_array().unwrap().len(), 30);
    assert_eq!(month["days"][0]["text"], "Rent");
}

#[test]
fn test_timer_settings_validation() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();

    let (code, _, stderr) = run_cli(d, &["timer", "settings", "--focus", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Focus time must be 1-90"));
    assert!(!d.join("desktop_widgets_data.json").exists());

    run_ok(d, &["timer", "settings", "--focus", "50", "--break", "10"]);
    let settings = run_json(d, &["timer", "settings"]);
    assert_eq!(settings["focus_minutes"], 50);
    assert_eq!(settings["break_minutes"], 10);

    let status = run_json(d, &["timer", "status"]);
    assert_eq!(status["state"], "idle");
    assert_eq!(status["time_left_secs"], 50 * 60);
}

#[test]
fn test_timer_run_records_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    run_ok(d, &["timer", "settings", "--focus", "1"]);

    let out = run_ok(d, &["timer", "run", "--quiet", "--tick-ms", "1"]);
    assert!(out.contains("\"PhaseCompleted\""));

    let history = run_json(d, &["timer", "history", "--days", "3"]);
    assert_eq!(history["today"], 1);
    assert_eq!(history["total"], 1);
    assert_eq!(history["days"].as_array().unwrap().len(), 3);
    assert_eq!(history["days"][0]["sessions"], 1);
}

#[test]
fn test_widget_attributes_persist() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();

    let shown = run_json(d, &["widget", "show", "todo"]);
    assert_eq!(shown["color"], "#E0FFE0");
    assert_eq!(shown["position"], serde_json::json!([100, 100]));

    run_ok(d, &["widget", "color", "todo", "#112233"]);
    run_ok(d, &["widget", "move", "todo", "40", "50"]);
    run_ok(d, &["widget", "expand", "day_planner"]);

    let config = config_file(d);
    assert_eq!(config["colors"]["todo"], "#112233");
    assert_eq!(config["positions"]["todo"], serde_json::json!([40, 50]));
    assert_eq!(config["expanded"]["day_planner"], true);

    let shown = run_json(d, &["plan", "day", "show"]);
    assert_eq!(shown["hours"].as_array().unwrap().len(), 19);
}

#[test]
fn test_widget_rejects_bad_color_and_name() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["widget", "color", "todo", "red"]);
    assert_ne!(code, 0);
    let (code, _, _) = run_cli(dir.path(), &["widget", "show", "sidebar"]);
    assert_ne!(code, 0);
}

#[test]
fn test_arrange_respects_saved_positions() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();

    run_ok(d, &["widget", "arrange", "1920", "1080"]);
    assert_eq!(
        config_file(d)["positions"]["calendar"],
        serde_json::json!([1600, 30])
    );

    run_ok(d, &["widget", "move", "calendar", "5", "5"]);
    let out = run_ok(d, &["widget", "arrange", "1920", "1080"]);
    assert!(out.contains("--force"));
    assert_eq!(config_file(d)["positions"]["calendar"], serde_json::json!([5, 5]));

    run_ok(d, &["widget", "reset-layout"]);
    assert!(config_file(d)["positions"].as_object().unwrap().is_empty());
}

#[test]
fn test_corrupt_data_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    std::fs::write(d.join("desktop_widgets_data.json"), "{ not json").unwrap();

    let listed = run_json(d, &["todo", "list"]);
    assert_eq!(listed["total"], 0);

    let (code, _, stderr) = run_cli(d, &["doctor"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Failed to parse"));
}

#[test]
fn test_doctor_on_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["doctor"]);
    assert!(out.contains("missing, defaults apply"));
    assert!(out.contains("load cleanly"));
}

#[test]
fn test_month_views_reject_out_of_range_years() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    let (code, _, stderr) = run_cli(d, &["plan", "month", "show", "--year", "2147483647", "--month", "12"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid year"));

    let (code, _, _) = run_cli(d, &["calendar", "month", "--year", "0", "--month", "1"]);
    assert_eq!(code, 1);
}

#[test]
fn test_timer_flags_reject_unbounded_values() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    let (code, _, _) = run_cli(d, &["timer", "run", "--tick-ms", "0"]);
    assert_eq!(code, 2);
    let (code, _, _) = run_cli(d, &["timer", "history", "--days", "4000000000"]);
    assert_eq!(code, 2);

    let history = run_json(d, &["timer", "history", "--days", "366"]);
    assert_eq!(history["days"].as_array().unwrap().len(), 366);
}

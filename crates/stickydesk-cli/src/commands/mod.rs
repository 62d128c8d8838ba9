pub mod calendar;
pub mod doctor;
pub mod plan;
pub mod timer;
pub mod todo;
pub mod widget;

use serde::Serialize;
use stickydesk_core::{DateKey, Desk, ValidationError};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Accepts `today`, `yesterday`, `tomorrow` or `YYYY-MM-DD`.
pub fn parse_date(desk: &Desk, input: &str) -> Result<DateKey, ValidationError> {
    match input.trim() {
        "today" => Ok(desk.today()),
        "yesterday" => Ok(desk.today().prev_day()),
        "tomorrow" => Ok(desk.today().next_day()),
        other => DateKey::parse(other),
    }
}

/// Lists are numbered from 1 on the command line; 0 maps to no index.
pub fn list_index(position: usize) -> Option<usize> {
    position.checked_sub(1)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

use clap::Subcommand;
use serde::Serialize;
use stickydesk_core::{DateKey, Desk, MonthCursor, StorePaths};

use super::{list_index, parse_date, print_json, CommandResult};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Add an event to a day
    Add {
        /// Event text
        text: String,
        /// Day (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(long, default_value = "today")]
        date: String,
    },
    /// List a day's events
    List {
        #[arg(long, default_value = "today")]
        date: String,
    },
    /// Remove one event by its number in `list`
    Remove {
        /// 1-based event number
        number: usize,
        #[arg(long, default_value = "today")]
        date: String,
    },
    /// Remove every event on a day
    Clear {
        #[arg(long, default_value = "today")]
        date: String,
    },
    /// Month grid with per-day event counts
    Month {
        /// Year (defaults to the current one)
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12 (defaults to the current one)
        #[arg(long)]
        month: Option<u32>,
    },
}

#[derive(Serialize)]
struct DayEvents<'a> {
    date: DateKey,
    events: &'a [String],
}

#[derive(Serialize)]
struct MonthCell {
    day: u32,
    events: usize,
    today: bool,
}

#[derive(Serialize)]
struct MonthView {
    month: String,
    label: String,
    weeks: Vec<[Option<MonthCell>; 7]>,
}

pub fn run(action: CalendarAction, paths: &StorePaths) -> CommandResult {
    let mut desk = Desk::open(paths);

    match action {
        CalendarAction::Add { text, date } => {
            let date = parse_date(&desk, &date)?;
            if desk.add_event(date, &text) {
                println!("Event added on {date}");
            } else {
                println!("Nothing to add: event text is empty");
            }
        }
        CalendarAction::List { date } => {
            let date = parse_date(&desk, &date)?;
            print_json(&DayEvents {
                date,
                events: desk.events(date),
            })?;
        }
        CalendarAction::Remove { number, date } => {
            let date = parse_date(&desk, &date)?;
            match list_index(number).and_then(|i| desk.remove_event(date, i)) {
                Some(text) => println!("Removed: {text}"),
                None => println!("No event #{number} on {date}"),
            }
        }
        CalendarAction::Clear { date } => {
            let date = parse_date(&desk, &date)?;
            let removed = desk.clear_events(date);
            println!("Removed {removed} event(s) on {date}");
        }
        CalendarAction::Month { year, month } => {
            let today = desk.today();
            let current = MonthCursor::containing(today.date());
            let cursor = MonthCursor::new(
                year.unwrap_or(current.year),
                month.unwrap_or(current.month),
            )?;
            print_json(&month_view(&desk, cursor, today))?;
        }
    }

    Ok(())
}

fn month_view(desk: &Desk, cursor: MonthCursor, today: DateKey) -> MonthView {
    let weeks = cursor
        .grid()
        .into_iter()
        .map(|week| {
            week.map(|cell| {
                let day = cell?;
                let date = DateKey::new(cursor.day(day)?);
                Some(MonthCell {
                    day,
                    events: desk.data().calendar_events.count(date),
                    today: date == today,
                })
            })
        })
        .collect();

    MonthView {
        month: cursor.to_string(),
        label: cursor.label(),
        weeks,
    }
}

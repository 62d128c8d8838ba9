use clap::Subcommand;
use serde::Serialize;
use stickydesk_core::widget::day_planner_hours;
use stickydesk_core::{
    week_days, week_start, DateKey, Desk, MonthCursor, PlanKind, PlanWrite, StorePaths, WidgetName,
};

use super::{parse_date, print_json, CommandResult};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Hour-by-hour notes for one day
    Day {
        #[command(subcommand)]
        action: DayAction,
    },
    /// One note per day, shown a week at a time
    Week {
        #[command(subcommand)]
        action: WeekAction,
    },
    /// One note per day, shown a month at a time
    Month {
        #[command(subcommand)]
        action: MonthAction,
    },
}

#[derive(Subcommand)]
pub enum DayAction {
    /// Set an hour's note; an empty note clears it
    Set {
        /// Hour 0-23
        hour: u32,
        /// Note text
        #[arg(default_value = "")]
        text: String,
        #[arg(long, default_value = "today")]
        date: String,
    },
    /// Print one hour's note
    Get {
        hour: u32,
        #[arg(long, default_value = "today")]
        date: String,
    },
    /// Print the hours the day planner shows
    Show {
        #[arg(long, default_value = "today")]
        date: String,
        /// Show every hour of the expanded view
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand)]
pub enum WeekAction {
    /// Set a day's note; an empty note clears it
    Set {
        #[arg(default_value = "")]
        text: String,
        #[arg(long, default_value = "today")]
        date: String,
    },
    /// Print one day's note
    Get {
        #[arg(long, default_value = "today")]
        date: String,
    },
    /// Print the Monday-to-Sunday week containing a day
    Show {
        #[arg(long, default_value = "today")]
        date: String,
    },
}

#[derive(Subcommand)]
pub enum MonthAction {
    /// Set a day's note; an empty note clears it
    Set {
        #[arg(default_value = "")]
        text: String,
        #[arg(long, default_value = "today")]
        date: String,
    },
    /// Print one day's note
    Get {
        #[arg(long, default_value = "today")]
        date: String,
    },
    /// Print every day of a month with its note
    Show {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
}

#[derive(Serialize)]
struct HourSlot<'a> {
    hour: u32,
    text: &'a str,
}

#[derive(Serialize)]
struct DayNote<'a> {
    date: DateKey,
    weekday: String,
    text: &'a str,
}

#[derive(Serialize)]
struct DayView<'a> {
    date: DateKey,
    expanded: bool,
    hours: Vec<HourSlot<'a>>,
}

#[derive(Serialize)]
struct RangeView<'a> {
    title: String,
    days: Vec<DayNote<'a>>,
}

pub fn run(action: PlanAction, paths: &StorePaths) -> CommandResult {
    let mut desk = Desk::open(paths);

    match action {
        PlanAction::Day { action } => run_day(&mut desk, action),
        PlanAction::Week { action } => match action {
            WeekAction::Set { text, date } => set_note(&mut desk, PlanKind::Weekly, &date, &text),
            WeekAction::Get { date } => get_note(&desk, PlanKind::Weekly, &date),
            WeekAction::Show { date } => {
                let date = parse_date(&desk, &date)?;
                let start = week_start(date.date());
                let days = week_days(start).map(DateKey::new);
                let title = format!("Week of {}", start.format("%b %-d, %Y"));
                print_json(&range_view(&desk, PlanKind::Weekly, title, &days))
            }
        },
        PlanAction::Month { action } => match action {
            MonthAction::Set { text, date } => {
                set_note(&mut desk, PlanKind::Monthly, &date, &text)
            }
            MonthAction::Get { date } => get_note(&desk, PlanKind::Monthly, &date),
            MonthAction::Show { year, month } => {
                let current = MonthCursor::containing(desk.today().date());
                let cursor = MonthCursor::new(
                    year.unwrap_or(current.year),
                    month.unwrap_or(current.month),
                )?;
                let days: Vec<DateKey> = cursor.days().into_iter().map(DateKey::new).collect();
                print_json(&range_view(&desk, PlanKind::Monthly, cursor.label(), &days))
            }
        },
    }
}

fn run_day(desk: &mut Desk, action: DayAction) -> CommandResult {
    match action {
        DayAction::Set { hour, text, date } => {
            let key = parse_date(desk, &date)?.at_hour(hour)?;
            report_write(desk.set_day_plan(key, &text), &key.to_string());
        }
        DayAction::Get { hour, date } => {
            let key = parse_date(desk, &date)?.at_hour(hour)?;
            println!("{}", desk.day_plan(key));
        }
        DayAction::Show { date, all } => {
            let date = parse_date(desk, &date)?;
            let expanded = all || desk.widget(WidgetName::DayPlanner).expanded;
            let mut hours = Vec::new();
            for hour in day_planner_hours(expanded) {
                let key = date.at_hour(hour)?;
                hours.push(HourSlot {
                    hour,
                    text: desk.day_plan(key),
                });
            }
            print_json(&DayView {
                date,
                expanded,
                hours,
            })?;
        }
    }
    Ok(())
}

fn set_note(desk: &mut Desk, kind: PlanKind, date: &str, text: &str) -> CommandResult {
    let date = parse_date(desk, date)?;
    report_write(desk.set_plan(kind, date, text), &date.to_string());
    Ok(())
}

fn get_note(desk: &Desk, kind: PlanKind, date: &str) -> CommandResult {
    let date = parse_date(desk, date)?;
    println!("{}", desk.plan(kind, date));
    Ok(())
}

fn report_write(write: PlanWrite, key: &str) {
    match write {
        PlanWrite::Stored => println!("Saved {key}"),
        PlanWrite::Removed => println!("Cleared {key}"),
        PlanWrite::Unchanged => println!("No change for {key}"),
    }
}

fn range_view<'a>(
    desk: &'a Desk,
    kind: PlanKind,
    title: String,
    days: &[DateKey],
) -> RangeView<'a> {
    let days = days
        .iter()
        .map(|&date| DayNote {
            date,
            weekday: date.date().format("%a").to_string(),
            text: desk.plan(kind, date),
        })
        .collect();
    RangeView { title, days }
}

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Subcommand;
use serde::Serialize;
use stickydesk_core::timer::{lock_desk, DayCount, TICK_PERIOD};
use stickydesk_core::{format_time, Desk, Event, SharedDesk, StorePaths, Ticker};
use tokio::sync::mpsc;

use super::{print_json, CommandResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Show the timer state a fresh start would see
    Status,
    /// Run the countdown in the foreground (Ctrl-C pauses and exits)
    Run {
        /// Number of phases to run back to back
        #[arg(long, default_value = "1")]
        phases: u32,
        /// Print only phase transitions, not the countdown
        #[arg(long)]
        quiet: bool,
        /// Tick period in milliseconds
        #[arg(long, hide = true, value_parser = clap::value_parser!(u64).range(1..))]
        tick_ms: Option<u64>,
    },
    /// Show or change focus and break durations
    Settings {
        /// Focus minutes (1-90)
        #[arg(long, allow_negative_numbers = true)]
        focus: Option<i64>,
        /// Break minutes (1-30)
        #[arg(long = "break", allow_negative_numbers = true)]
        break_minutes: Option<i64>,
    },
    /// Completed focus sessions per day, newest first
    History {
        /// How many days back to show, today included (at most 366)
        #[arg(long, default_value = "7", value_parser = clap::value_parser!(u32).range(1..=366))]
        days: u32,
    },
}

#[derive(Serialize)]
struct HistoryView {
    days: Vec<DayCount>,
    today: u32,
    total: u64,
    best_day: u32,
}

pub fn run(action: TimerAction, paths: &StorePaths) -> CommandResult {
    match action {
        TimerAction::Status => {
            let mut desk = Desk::open(paths);
            print_json(&desk.pomodoro().snapshot())
        }
        TimerAction::Run {
            phases,
            quiet,
            tick_ms,
        } => {
            let period = tick_ms.map(Duration::from_millis).unwrap_or(TICK_PERIOD);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_foreground(paths, phases.max(1), quiet, period))
        }
        TimerAction::Settings {
            focus,
            break_minutes,
        } => {
            let mut desk = Desk::open(paths);
            if focus.is_none() && break_minutes.is_none() {
                return print_json(&desk.pomodoro().settings());
            }
            let current = desk.pomodoro().settings();
            let event = desk.pomodoro_update_settings(
                focus.unwrap_or(i64::from(current.focus_minutes)),
                break_minutes.unwrap_or(i64::from(current.break_minutes)),
            )?;
            print_json(&event)
        }
        TimerAction::History { days } => {
            let desk = Desk::open(paths);
            let history = &desk.data().pomodoro_history;
            print_json(&HistoryView {
                days: desk.recent_sessions(days),
                today: desk.sessions_today(),
                total: history.total(),
                best_day: history.max_count(),
            })
        }
    }
}

async fn run_foreground(
    paths: &StorePaths,
    phases: u32,
    quiet: bool,
    period: Duration,
) -> CommandResult {
    let desk: SharedDesk = Arc::new(Mutex::new(Desk::open(paths)));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut ticker = Ticker::new(Arc::clone(&desk), tx).with_period(period);

    if let Some(event) = ticker.start_timer() {
        print_json(&event)?;
    }

    let mut remaining = phases;
    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else { break };
                match event {
                    Event::Tick { phase, time_left_secs, .. } => {
                        if !quiet {
                            print!("\r{} {}", phase.label(), format_time(time_left_secs));
                            std::io::stdout().flush()?;
                        }
                    }
                    completed @ Event::PhaseCompleted { .. } => {
                        if !quiet {
                            println!();
                        }
                        print_json(&completed)?;
                        remaining -= 1;
                        if remaining == 0 {
                            break;
                        }
                        ticker.join().await;
                        if let Some(event) = ticker.start_timer() {
                            print_json(&event)?;
                        }
                    }
                    _ => {}
                }
            }
            _ = tokio::signal::ctrl_c() => {
                if !quiet {
                    println!();
                }
                if let Some(event) = ticker.pause_timer() {
                    print_json(&event)?;
                }
                break;
            }
        }
    }

    let snapshot = lock_desk(&desk).pomodoro().snapshot();
    tracing::debug!(?snapshot, "timer run finished");
    Ok(())
}

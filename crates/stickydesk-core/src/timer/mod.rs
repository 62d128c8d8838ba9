mod engine;
mod history;
mod settings;
mod ticker;

pub use engine::{format_time, Phase, PomodoroEngine, TimerState};
pub use history::{DayCount, SessionHistory, MAX_RECENT_DAYS};
pub use settings::{PomodoroSettings, BREAK_MINUTES, FOCUS_MINUTES};
pub use ticker::{lock_desk, SharedDesk, Ticker, MIN_TICK_PERIOD, TICK_PERIOD};

//! # StickyDesk Core Library
//!
//! Data model behind a set of desktop sticky widgets: a calendar, a to-do
//! list, day/week/month planners and a pomodoro timer. Rendering lives
//! elsewhere (the CLI in this workspace is one such front end); this crate
//! owns the state those front ends read and mutate.
//!
//! ## Architecture
//!
//! - **Storage**: two whole-file JSON documents, [`AppData`] and
//!   [`AppConfig`], loaded fail-soft and rewritten atomically on every change
//! - **Desk**: the single owner of both documents; every operation goes
//!   through it and ends with a best-effort save
//! - **Collections**: date-keyed calendar events and planner notes where an
//!   empty write is a deletion
//! - **Timer**: a second-granular pomodoro state machine plus a cancellable
//!   tokio ticker that drives it
//!
//! ## Key Components
//!
//! - [`Desk`]: owning state object
//! - [`PomodoroEngine`]: countdown and session counting
//! - [`JsonStore`]: document load/save gateway
//! - [`WidgetState`]: resolved per-widget presentation attributes

pub mod clock;
pub mod collections;
pub mod dates;
pub mod desk;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;
pub mod todo;
pub mod widget;

pub use clock::{Clock, FixedClock, SystemClock};
pub use collections::{DatePlans, DayPlans, EventMap, PlanMap, PlanWrite};
pub use dates::{week_days, week_start, DateKey, DayPlanKey, MonthCursor};
pub use desk::{Desk, PlanKind};
pub use error::{CoreError, StoreError, ValidationError};
pub use events::Event;
pub use storage::{AppConfig, AppData, JsonStore, StorePaths};
pub use timer::{
    format_time, Phase, PomodoroEngine, PomodoroSettings, SessionHistory, SharedDesk, Ticker,
    TimerState,
};
pub use todo::{TodoItem, TodoList};
pub use widget::{HexColor, Position, Size, WidgetName, WidgetState};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Phase, TimerState};

/// Everything the pomodoro engine reports back to its host.
///
/// Events are observational only: the display refreshes on `Tick`, the
/// completion alert is raised on `PhaseCompleted`. Nothing flows back into
/// the engine through them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    /// One second elapsed while running.
    Tick {
        phase: Phase,
        time_left_secs: u32,
        is_running: bool,
    },
    /// A countdown reached zero (or was skipped). The timer is stopped and
    /// already loaded with the next phase.
    PhaseCompleted {
        completed: Phase,
        next: Phase,
        /// Sessions finished today, including this one for focus phases.
        sessions_today: u32,
        time_left_secs: u32,
        skipped: bool,
        at: DateTime<Utc>,
    },
    TimerReset {
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    SettingsUpdated {
        focus_minutes: u32,
        break_minutes: u32,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        phase: Phase,
        is_running: bool,
        time_left_secs: u32,
        total_secs: u32,
        sessions_today: u32,
        focus_minutes: u32,
        break_minutes: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn is_phase_completed(&self) -> bool {
        matches!(self, Event::PhaseCompleted { .. })
    }
}

//! Pomodoro countdown engine.
//!
//! A second-granular state machine. It owns no thread or timer: the host
//! calls `tick()` once per second while the engine is running (see
//! [`super::Ticker`]).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> RunningFocus <-> PausedFocus
//!              |  (time_left == 0 or skip)
//!              v
//!         PausedBreak <-> RunningBreak
//!              |  (time_left == 0 or skip)
//!              v
//!            Idle
//! ```
//!
//! A phase boundary always stops the timer; the next phase needs an explicit
//! `start()`. Finishing a focus phase adds one session to today's bucket of
//! the [`SessionHistory`] passed in by the caller.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::history::SessionHistory;
use super::settings::PomodoroSettings;
use crate::dates::DateKey;
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    pub fn other(&self) -> Phase {
        match self {
            Phase::Focus => Phase::Break,
            Phase::Break => Phase::Focus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Focus => "FOCUS TIME",
            Phase::Break => "BREAK TIME",
        }
    }
}

/// Combined view of the running flag and the phase.
///
/// `Idle` is a stopped focus phase with its full duration left; a stopped
/// focus phase with time already spent is `PausedFocus`, and every stopped
/// break is `PausedBreak`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    Idle,
    RunningFocus,
    PausedFocus,
    RunningBreak,
    PausedBreak,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroEngine {
    settings: PomodoroSettings,
    phase: Phase,
    is_running: bool,
    /// Seconds left in the current phase.
    time_left: u32,
    /// Cached copy of today's bucket in the session history.
    sessions_today: u32,
}

impl PomodoroEngine {
    /// Stopped, in focus, with the full focus duration loaded.
    pub fn new(settings: PomodoroSettings, sessions_today: u32) -> Self {
        Self {
            settings,
            phase: Phase::Focus,
            is_running: false,
            time_left: settings.focus_secs(),
            sessions_today,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn sessions_today(&self) -> u32 {
        self.sessions_today
    }

    pub fn settings(&self) -> PomodoroSettings {
        self.settings
    }

    pub fn state(&self) -> TimerState {
        match (self.is_running, self.phase) {
            (true, Phase::Focus) => TimerState::RunningFocus,
            (true, Phase::Break) => TimerState::RunningBreak,
            (false, Phase::Focus) if self.time_left == self.settings.focus_secs() => {
                TimerState::Idle
            }
            (false, Phase::Focus) => TimerState::PausedFocus,
            (false, Phase::Break) => TimerState::PausedBreak,
        }
    }

    /// Full length of the current phase under the current settings.
    pub fn total_secs(&self) -> u32 {
        self.phase_secs(self.phase)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        (1.0 - f64::from(self.time_left) / f64::from(total)).clamp(0.0, 1.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            phase: self.phase,
            is_running: self.is_running,
            time_left_secs: self.time_left,
            total_secs: self.total_secs(),
            sessions_today: self.sessions_today,
            focus_minutes: self.settings.focus_minutes,
            break_minutes: self.settings.break_minutes,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.is_running {
            return None;
        }
        self.is_running = true;
        Some(Event::TimerStarted {
            phase: self.phase,
            time_left_secs: self.time_left,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        Some(Event::TimerPaused {
            phase: self.phase,
            time_left_secs: self.time_left,
            at: Utc::now(),
        })
    }

    /// The start/pause button.
    pub fn toggle(&mut self) -> Event {
        let event = if self.is_running {
            self.pause()
        } else {
            self.start()
        };
        event.unwrap_or_else(|| self.snapshot())
    }

    /// Advance one second. No-op while stopped.
    ///
    /// Returns `Tick` for an ordinary second and `PhaseCompleted` when the
    /// countdown reaches zero.
    pub fn tick(&mut self, history: &mut SessionHistory, today: DateKey) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            return Some(self.complete_phase(history, today, false));
        }
        Some(Event::Tick {
            phase: self.phase,
            time_left_secs: self.time_left,
            is_running: self.is_running,
        })
    }

    /// Finish the current phase now, exactly as if it had counted down.
    pub fn skip(&mut self, history: &mut SessionHistory, today: DateKey) -> Event {
        self.time_left = 0;
        self.complete_phase(history, today, true)
    }

    /// Back to a stopped focus phase. Session history is left alone.
    pub fn reset(&mut self) -> Event {
        self.is_running = false;
        self.phase = Phase::Focus;
        self.time_left = self.settings.focus_secs();
        Event::TimerReset {
            time_left_secs: self.time_left,
            at: Utc::now(),
        }
    }

    /// Validate and apply new durations.
    ///
    /// While stopped, the current phase is reloaded with its new duration.
    /// While running, the countdown continues and the new durations apply
    /// from the next phase load.
    pub fn update_settings(
        &mut self,
        focus_minutes: i64,
        break_minutes: i64,
    ) -> Result<Event, ValidationError> {
        let settings = PomodoroSettings::validated(focus_minutes, break_minutes)?;
        self.settings = settings;
        if !self.is_running {
            self.time_left = self.phase_secs(self.phase);
        }
        Ok(Event::SettingsUpdated {
            focus_minutes: settings.focus_minutes,
            break_minutes: settings.break_minutes,
            time_left_secs: self.time_left,
            at: Utc::now(),
        })
    }

    /// Re-read today's count, e.g. after the date rolled over.
    pub fn refresh_sessions_today(&mut self, history: &SessionHistory, today: DateKey) {
        self.sessions_today = history.count(today);
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn phase_secs(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.settings.focus_secs(),
            Phase::Break => self.settings.break_secs(),
        }
    }

    fn complete_phase(&mut self, history: &mut SessionHistory, today: DateKey, skipped: bool) -> Event {
        let completed = self.phase;
        self.is_running = false;
        if completed == Phase::Focus {
            self.sessions_today = history.record_session(today);
        } else {
            self.sessions_today = history.count(today);
        }
        self.phase = completed.other();
        self.time_left = self.phase_secs(self.phase);
        Event::PhaseCompleted {
            completed,
            next: self.phase,
            sessions_today: self.sessions_today,
            time_left_secs: self.time_left,
            skipped,
            at: Utc::now(),
        }
    }
}

/// `MM:SS`, minutes unbounded.
pub fn format_time(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

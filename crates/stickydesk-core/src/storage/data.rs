//! The `AppData` document: everything the widgets record.

use serde::{Deserialize, Serialize};

use super::store::Document;
use crate::collections::{DatePlans, DayPlans, EventMap};
use crate::timer::{PomodoroSettings, SessionHistory};
use crate::todo::TodoList;

/// Serialized to/from JSON at `<data dir>/desktop_widgets_data.json`.
///
/// Missing sections load as empty; see [`Document::normalize`] for the
/// repairs applied to what is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppData {
    pub calendar_events: EventMap,
    pub todos: TodoList,
    pub day_plans: DayPlans,
    pub weekly_plans: DatePlans,
    pub monthly_plans: DatePlans,
    pub pomodoro_history: SessionHistory,
    pub pomodoro_settings: PomodoroSettings,
}

impl Document for AppData {
    const KIND: &'static str = "data";

    fn normalize(&mut self) {
        if !self.pomodoro_settings.is_valid() {
            tracing::warn!(
                focus_minutes = self.pomodoro_settings.focus_minutes,
                break_minutes = self.pomodoro_settings.break_minutes,
                "stored pomodoro settings out of range, using defaults"
            );
            self.pomodoro_settings = PomodoroSettings::default();
        }
    }
}

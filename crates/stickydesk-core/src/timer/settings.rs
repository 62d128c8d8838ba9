use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const FOCUS_MINUTES: RangeInclusive<u32> = 1..=90;
pub const BREAK_MINUTES: RangeInclusive<u32> = 1..=30;

/// Phase durations in whole minutes.
///
/// Older data files stored these as `focus`/`break`; both spellings load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroSettings {
    #[serde(alias = "focus", default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(alias = "break", default = "default_break_minutes")]
    pub break_minutes: u32,
}

fn default_focus_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl PomodoroSettings {
    /// Builds settings from raw user input, checking both ranges.
    pub fn validated(focus_minutes: i64, break_minutes: i64) -> Result<Self, ValidationError> {
        let focus = u32::try_from(focus_minutes)
            .ok()
            .filter(|m| FOCUS_MINUTES.contains(m))
            .ok_or(ValidationError::FocusMinutes {
                value: focus_minutes,
                min: *FOCUS_MINUTES.start(),
                max: *FOCUS_MINUTES.end(),
            })?;
        let brk = u32::try_from(break_minutes)
            .ok()
            .filter(|m| BREAK_MINUTES.contains(m))
            .ok_or(ValidationError::BreakMinutes {
                value: break_minutes,
                min: *BREAK_MINUTES.start(),
                max: *BREAK_MINUTES.end(),
            })?;
        Ok(Self {
            focus_minutes: focus,
            break_minutes: brk,
        })
    }

    pub fn is_valid(&self) -> bool {
        FOCUS_MINUTES.contains(&self.focus_minutes) && BREAK_MINUTES.contains(&self.break_minutes)
    }

    pub fn focus_secs(&self) -> u32 {
        self.focus_minutes.saturating_mul(60)
    }

    pub fn break_secs(&self) -> u32 {
        self.break_minutes.saturating_mul(60)
    }
}

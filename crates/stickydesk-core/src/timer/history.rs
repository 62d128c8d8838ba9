use std::collections::BTreeMap;

use chrono::Days;
use serde::{Deserialize, Deserializer, Serialize};

use crate::dates::DateKey;
use crate::storage::lenient_entries;

/// Longest window [`SessionHistory::recent`] will build.
pub const MAX_RECENT_DAYS: u32 = 366;

/// Completed focus sessions per day. An absent day counts as zero and a
/// day's count only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SessionHistory(BTreeMap<DateKey, u32>);

/// One row of the recent-history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: DateKey,
    pub sessions: u32,
}

impl SessionHistory {
    pub fn count(&self, day: DateKey) -> u32 {
        self.0.get(&day).copied().unwrap_or(0)
    }

    /// Adds one session to `day` and returns the day's new total.
    pub fn record_session(&mut self, day: DateKey) -> u32 {
        let count = self.0.entry(day).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// The last `days` days ending at `today`, newest first, zero-filled.
    /// At most [`MAX_RECENT_DAYS`] rows.
    pub fn recent(&self, today: DateKey, days: u32) -> Vec<DayCount> {
        (0..days.min(MAX_RECENT_DAYS))
            .filter_map(|offset| today.date().checked_sub_days(Days::new(u64::from(offset))))
            .map(DateKey::new)
            .map(|date| DayCount {
                date,
                sessions: self.count(date),
            })
            .collect()
    }

    /// Largest count on record, at least 1, for scaling bars.
    pub fn max_count(&self) -> u32 {
        self.0.values().copied().max().unwrap_or(0).max(1)
    }

    pub fn total(&self) -> u64 {
        self.0.values().map(|&c| u64::from(c)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &u32)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for SessionHistory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(Self(lenient_entries(raw, "pomodoro_history")))
    }
}

//! Date-keyed stores behind the calendar and the three planners.
//!
//! Empty values are never resident. Every write path normalizes its input
//! first: whitespace is trimmed, an empty plan text becomes a deletion, and
//! removing the last event of a day removes the day. Reads of an absent key
//! return the empty value, so callers never see a difference between
//! "absent" and "explicitly empty".

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::dates::{DateKey, DayPlanKey};
use crate::storage::lenient_entries;

/// Outcome of a plan write after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanWrite {
    /// Text stored (new key or replaced value).
    Stored,
    /// Empty text removed an existing key.
    Removed,
    /// Nothing changed: same text, or empty text on an absent key.
    Unchanged,
}

impl PlanWrite {
    pub fn changed(&self) -> bool {
        !matches!(self, PlanWrite::Unchanged)
    }
}

/// Calendar events: an ordered list of texts per day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventMap(BTreeMap<DateKey, Vec<String>>);

impl EventMap {
    /// Appends `text` to the day's list, creating it when absent.
    /// Blank text is ignored.
    pub fn add(&mut self, date: DateKey, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.0.entry(date).or_default().push(text.to_string());
        true
    }

    /// Removes the event at `index`; drops the day once its list empties.
    /// Returns the removed text, `None` for an absent day or stale index.
    pub fn remove(&mut self, date: DateKey, index: usize) -> Option<String> {
        let events = self.0.get_mut(&date)?;
        if index >= events.len() {
            return None;
        }
        let removed = events.remove(index);
        if events.is_empty() {
            self.0.remove(&date);
        }
        Some(removed)
    }

    /// Removes every event on `date`. Returns how many were removed.
    pub fn clear(&mut self, date: DateKey) -> usize {
        self.0.remove(&date).map(|events| events.len()).unwrap_or(0)
    }

    pub fn get(&self, date: DateKey) -> &[String] {
        self.0.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, date: DateKey) -> usize {
        self.get(date).len()
    }

    pub fn has_events(&self, date: DateKey) -> bool {
        self.0.contains_key(&date)
    }

    pub fn contains_key(&self, date: DateKey) -> bool {
        self.0.contains_key(&date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &Vec<String>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for EventMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut map: BTreeMap<DateKey, Vec<String>> = lenient_entries(raw, "calendar_events");
        for events in map.values_mut() {
            events.retain(|e| !e.trim().is_empty());
        }
        map.retain(|_, events| !events.is_empty());
        Ok(Self(map))
    }
}

/// One free-text note per key; used for day, week and month plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlanMap<K: Ord>(BTreeMap<K, String>);

/// Hour slots, keyed `YYYY-MM-DD_H`.
pub type DayPlans = PlanMap<DayPlanKey>;
/// Per-day notes for the weekly and monthly planners.
pub type DatePlans = PlanMap<DateKey>;

impl<K: Ord> Default for PlanMap<K> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<K: Ord + Copy> PlanMap<K> {
    /// Replaces the note at `key`. Blank text deletes the key.
    pub fn set(&mut self, key: K, text: &str) -> PlanWrite {
        let text = text.trim();
        if text.is_empty() {
            return if self.0.remove(&key).is_some() {
                PlanWrite::Removed
            } else {
                PlanWrite::Unchanged
            };
        }
        if self.0.get(&key).is_some_and(|existing| existing == text) {
            return PlanWrite::Unchanged;
        }
        self.0.insert(key, text.to_string());
        PlanWrite::Stored
    }

    pub fn remove(&mut self, key: K) -> bool {
        self.0.remove(&key).is_some()
    }

    pub fn get(&self, key: K) -> &str {
        self.0.get(&key).map(String::as_str).unwrap_or("")
    }

    pub fn contains_key(&self, key: K) -> bool {
        self.0.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de, K> Deserialize<'de> for PlanMap<K>
where
    K: Ord + FromStr,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut map: BTreeMap<K, String> = lenient_entries(raw, "plans");
        map.retain(|_, text| !text.trim().is_empty());
        Ok(Self(map))
    }
}

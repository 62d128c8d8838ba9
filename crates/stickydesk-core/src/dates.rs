//! Date keys and calendar arithmetic shared by every planner.
//!
//! All date-keyed collections use the same textual key, `YYYY-MM-DD`
//! ([`DateKey`]). Day plans add an hour suffix, `YYYY-MM-DD_H`, with the hour
//! unpadded ([`DayPlanKey`]). Both forms are the persisted map keys, so their
//! `Display` output must stay byte-for-byte stable.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Years a four-digit key can hold.
pub const KEY_YEARS: RangeInclusive<i32> = 1..=9999;

fn clamp_to_key_range(date: NaiveDate) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(*KEY_YEARS.start(), 1, 1);
    let last = NaiveDate::from_ymd_opt(*KEY_YEARS.end(), 12, 31);
    match (first, last) {
        (Some(first), Some(last)) => date.clamp(first, last),
        _ => date,
    }
}

/// Canonical `YYYY-MM-DD` map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Dates outside [`KEY_YEARS`] are clamped to its first or last day.
    pub fn new(date: NaiveDate) -> Self {
        Self(clamp_to_key_range(date))
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        // chrono accepts unpadded fields; the key format does not.
        if trimmed.len() != 10 {
            return Err(ValidationError::DateKey(s.to_string()));
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .ok()
            .filter(|date| KEY_YEARS.contains(&date.year()))
            .map(Self)
            .ok_or_else(|| ValidationError::DateKey(s.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn prev_day(&self) -> Self {
        Self::new(self.0.pred_opt().unwrap_or(self.0))
    }

    pub fn next_day(&self) -> Self {
        Self::new(self.0.succ_opt().unwrap_or(self.0))
    }

    /// Key for the day-plan slot at `hour` on this date.
    pub fn at_hour(&self, hour: u32) -> Result<DayPlanKey, ValidationError> {
        DayPlanKey::new(*self, hour)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DateKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

/// Day-plan slot key, persisted as `YYYY-MM-DD_H`.
///
/// Orders by date, then numerically by hour (so `_9` sorts before `_10`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayPlanKey {
    date: DateKey,
    hour: u8,
}

impl DayPlanKey {
    pub fn new(date: DateKey, hour: u32) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::Hour(hour));
        }
        Ok(Self {
            date,
            hour: hour as u8,
        })
    }

    pub fn date(&self) -> DateKey {
        self.date
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.hour)
    }
}

impl fmt::Display for DayPlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.date, self.hour)
    }
}

impl FromStr for DayPlanKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (date, hour) = s
            .rsplit_once('_')
            .ok_or_else(|| ValidationError::DateKey(s.to_string()))?;
        // Padded hours ("09") would never be looked up again, so reject them.
        if hour.is_empty() || (hour.len() > 1 && hour.starts_with('0')) {
            return Err(ValidationError::DateKey(s.to_string()));
        }
        let hour: u32 = hour
            .parse()
            .map_err(|_| ValidationError::DateKey(s.to_string()))?;
        Self::new(DateKey::parse(date)?, hour)
    }
}

impl TryFrom<String> for DayPlanKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayPlanKey> for String {
    fn from(key: DayPlanKey) -> Self {
        key.to_string()
    }
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// The seven consecutive days beginning at `start`.
pub fn week_days(start: NaiveDate) -> [NaiveDate; 7] {
    let mut days = [start; 7];
    for (i, day) in days.iter_mut().enumerate() {
        *day = start.checked_add_days(Days::new(i as u64)).unwrap_or(start);
    }
    days
}

/// Moves a week start by `weeks` (negative goes back).
pub fn shift_weeks(start: NaiveDate, weeks: i64) -> NaiveDate {
    let days = weeks.unsigned_abs().saturating_mul(7);
    if weeks >= 0 {
        start.checked_add_days(Days::new(days)).unwrap_or(start)
    } else {
        start.checked_sub_days(Days::new(days)).unwrap_or(start)
    }
}

/// A displayed month, independent of any day-of-month.
///
/// Navigating by `(year, month)` alone means moving from Jan 31 never has
/// to invent a Feb 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::Month(month));
        }
        if !KEY_YEARS.contains(&year) {
            return Err(ValidationError::Year(year));
        }
        Ok(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The following month; stays put if the year would overflow.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            match self.year.checked_add(1) {
                Some(year) => Self { year, month: 1 },
                None => *self,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month; stays put if the year would overflow.
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            match self.year.checked_sub(1) {
                Some(year) => Self { year, month: 12 },
                None => *self,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Date for `day` of this month, `None` past the month's end.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next();
        match (self.first_day(), next.first_day()) {
            (Some(first), Some(next_first)) => (next_first - first).num_days() as u32,
            _ => 0,
        }
    }

    /// Every date of the month in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        (1..=self.days_in_month()).filter_map(|d| self.day(d)).collect()
    }

    /// Monday-first weeks of day numbers; cells outside the month are `None`.
    pub fn grid(&self) -> Vec<[Option<u32>; 7]> {
        let Some(first) = self.first_day() else {
            return Vec::new();
        };
        let lead = first.weekday().num_days_from_monday() as usize;
        let total = self.days_in_month() as usize;

        let mut weeks = Vec::new();
        let mut week = [None; 7];
        for cell in 0..lead + total {
            if cell >= lead {
                week[cell % 7] = Some((cell - lead + 1) as u32);
            }
            if cell % 7 == 6 {
                weeks.push(week);
                week = [None; 7];
            }
        }
        if week.iter().any(Option::is_some) {
            weeks.push(week);
        }
        weeks
    }

    /// Human label such as `June 2024`.
    pub fn label(&self) -> String {
        self.first_day()
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

//! Widget identities and their persisted presentation attributes.
//!
//! Every panel owns four independently optional attributes in
//! [`crate::storage::AppConfig`]: color, position, size and the expanded
//! flag. Anything not stored falls back to the built-in table in
//! [`WidgetName::defaults`].

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Stable widget identifiers, used as map keys in both documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetName {
    Calendar,
    Todo,
    DayPlanner,
    WeeklyPlanner,
    MonthlyPlanner,
    Pomodoro,
}

impl WidgetName {
    pub const ALL: [WidgetName; 6] = [
        WidgetName::Calendar,
        WidgetName::Todo,
        WidgetName::DayPlanner,
        WidgetName::WeeklyPlanner,
        WidgetName::MonthlyPlanner,
        WidgetName::Pomodoro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetName::Calendar => "calendar",
            WidgetName::Todo => "todo",
            WidgetName::DayPlanner => "day_planner",
            WidgetName::WeeklyPlanner => "weekly_planner",
            WidgetName::MonthlyPlanner => "monthly_planner",
            WidgetName::Pomodoro => "pomodoro",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WidgetName::Calendar => "Calendar",
            WidgetName::Todo => "To-Do List",
            WidgetName::DayPlanner => "Day Planner",
            WidgetName::WeeklyPlanner => "Weekly Planner",
            WidgetName::MonthlyPlanner => "Monthly Planner",
            WidgetName::Pomodoro => "Pomodoro Timer",
        }
    }

    /// Compiled-in attributes used when nothing is stored for this widget.
    pub fn defaults(&self) -> WidgetState {
        let (color, width, height) = match self {
            WidgetName::Calendar => ("#FFE4E1", 300, 350),
            WidgetName::Todo => ("#E0FFE0", 280, 280),
            WidgetName::DayPlanner => ("#E6E6FA", 300, 380),
            WidgetName::WeeklyPlanner => ("#FFEFD5", 600, 380),
            WidgetName::MonthlyPlanner => ("#E0FFFF", 650, 450),
            WidgetName::Pomodoro => ("#FFF0F5", 300, 220),
        };
        WidgetState {
            color: HexColor(color.to_string()),
            position: DEFAULT_POSITION,
            size: Size { width, height },
            expanded: false,
        }
    }
}

impl fmt::Display for WidgetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetName::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownWidget(s.to_string()))
    }
}

/// `#RRGGBB` color, stored exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        let valid = s.len() == 7
            && s.starts_with('#')
            && s[1..].chars().all(|c| c.is_ascii_hexdigit());
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(ValidationError::HexColor(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }

    /// Scales each channel by `factor` (clamped to 0.0..=1.0); used for
    /// header strips and hour labels.
    pub fn darken(&self, factor: f64) -> HexColor {
        let factor = factor.clamp(0.0, 1.0);
        let (r, g, b) = self.rgb();
        let scale = |c: u8| (f64::from(c) * factor) as u8;
        HexColor(format!("#{:02x}{:02x}{:02x}", scale(r), scale(g), scale(b)))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

/// Top-left corner in screen pixels, persisted as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (i32, i32) {
    fn from(p: Position) -> Self {
        (p.x, p.y)
    }
}

/// Window size in pixels, persisted as `[w, h]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl From<Size> for (u32, u32) {
    fn from(s: Size) -> Self {
        (s.width, s.height)
    }
}

pub const DEFAULT_POSITION: Position = Position { x: 100, y: 100 };

/// Fully resolved attributes of one widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetState {
    pub color: HexColor,
    pub position: Position,
    pub size: Size,
    pub expanded: bool,
}

/// Initial placement for a screen of `screen_width` x `screen_height`, used
/// when no positions have been saved yet.
pub fn default_arrangement(screen_width: i32, screen_height: i32) -> Vec<(WidgetName, Position)> {
    let w = screen_width;
    let placements = [
        (WidgetName::Calendar, w - 320, 30),
        (WidgetName::Todo, w - 320, 420),
        (WidgetName::DayPlanner, w - 640, 30),
        (WidgetName::WeeklyPlanner, 30, 30),
        (WidgetName::MonthlyPlanner, 30, 450),
        (WidgetName::Pomodoro, w - 320, 720),
    ];
    placements
        .into_iter()
        .map(|(name, x, y)| {
            let position = Position {
                x: x.min(screen_width - 100),
                y: y.min(screen_height - 100),
            };
            (name, position)
        })
        .collect()
}

/// Hours shown by the day planner; expanding reveals early morning and late
/// evening slots.
pub fn day_planner_hours(expanded: bool) -> RangeInclusive<u32> {
    if expanded {
        5..=23
    } else {
        7..=19
    }
}

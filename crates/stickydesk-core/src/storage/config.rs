//! JSON-based widget configuration.
//!
//! Stores per-widget presentation state:
//! - Background color
//! - Window position and size
//! - Expanded/collapsed flag
//!
//! Configuration is stored at `<data dir>/desktop_widgets_config.json`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::lenient_entries;
use super::store::Document;
use crate::widget::{HexColor, Position, Size, WidgetName, WidgetState};

/// Widget configuration. Every map is sparse; [`AppConfig::widget`]
/// fills the gaps from [`WidgetName::defaults`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(deserialize_with = "widget_map")]
    pub colors: BTreeMap<WidgetName, HexColor>,
    #[serde(deserialize_with = "widget_map")]
    pub positions: BTreeMap<WidgetName, Position>,
    #[serde(deserialize_with = "widget_map")]
    pub sizes: BTreeMap<WidgetName, Size>,
    #[serde(deserialize_with = "widget_map")]
    pub expanded: BTreeMap<WidgetName, bool>,
}

fn widget_map<'de, D, V>(deserializer: D) -> Result<BTreeMap<WidgetName, V>, D::Error>
where
    D: Deserializer<'de>,
    V: DeserializeOwned,
{
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(lenient_entries(raw, "widget config"))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            colors: WidgetName::ALL
                .into_iter()
                .map(|name| (name, name.defaults().color))
                .collect(),
            positions: BTreeMap::new(),
            sizes: BTreeMap::new(),
            expanded: BTreeMap::new(),
        }
    }
}

impl Document for AppConfig {
    const KIND: &'static str = "config";
}

impl AppConfig {
    /// Resolve every attribute of `name`, field by field.
    pub fn widget(&self, name: WidgetName) -> WidgetState {
        let defaults = name.defaults();
        WidgetState {
            color: self.colors.get(&name).cloned().unwrap_or(defaults.color),
            position: self.positions.get(&name).copied().unwrap_or(defaults.position),
            size: self.sizes.get(&name).copied().unwrap_or(defaults.size),
            expanded: self.expanded.get(&name).copied().unwrap_or(defaults.expanded),
        }
    }

    pub fn set_color(&mut self, name: WidgetName, color: HexColor) -> bool {
        self.colors.insert(name, color.clone()) != Some(color)
    }

    pub fn set_position(&mut self, name: WidgetName, position: Position) -> bool {
        self.positions.insert(name, position) != Some(position)
    }

    pub fn set_size(&mut self, name: WidgetName, size: Size) -> bool {
        self.sizes.insert(name, size) != Some(size)
    }

    pub fn set_expanded(&mut self, name: WidgetName, expanded: bool) -> bool {
        self.expanded.insert(name, expanded) != Some(expanded)
    }

    /// Flips the expanded flag and returns the new value.
    pub fn toggle_expanded(&mut self, name: WidgetName) -> bool {
        let expanded = !self.widget(name).expanded;
        self.expanded.insert(name, expanded);
        expanded
    }

    /// Forgets every saved position and size. Colors and expansion stay.
    pub fn reset_layout(&mut self) -> bool {
        let changed = !self.positions.is_empty() || !self.sizes.is_empty();
        self.positions.clear();
        self.sizes.clear();
        changed
    }

    pub fn has_saved_positions(&self) -> bool {
        !self.positions.is_empty()
    }
}

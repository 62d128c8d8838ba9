//! The owning state object for both documents.
//!
//! A [`Desk`] is created once per process and handed to whatever needs the
//! data. Each mutating call updates the in-memory document and immediately
//! rewrites that document on disk. A failed save is logged and otherwise
//! ignored: the in-memory state stays authoritative for the session.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::collections::PlanWrite;
use crate::dates::{DateKey, DayPlanKey};
use crate::error::ValidationError;
use crate::events::Event;
use crate::storage::{AppConfig, AppData, JsonStore, StorePaths};
use crate::timer::{DayCount, PomodoroEngine};
use crate::todo::TodoItem;
use crate::widget::{HexColor, Position, Size, WidgetName, WidgetState};

/// Which per-day note collection a plan write targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanKind {
    Weekly,
    Monthly,
}

pub struct Desk {
    data: AppData,
    config: AppConfig,
    data_store: JsonStore<AppData>,
    config_store: JsonStore<AppConfig>,
    clock: Arc<dyn Clock>,
    pomodoro: PomodoroEngine,
}

impl Desk {
    /// Load both documents from `paths`, using the local date.
    pub fn open(paths: &StorePaths) -> Self {
        Self::open_with_clock(paths, Arc::new(SystemClock))
    }

    pub fn open_with_clock(paths: &StorePaths, clock: Arc<dyn Clock>) -> Self {
        let data_store = JsonStore::new(&paths.data);
        let config_store = JsonStore::new(&paths.config);
        let data: AppData = data_store.load();
        let config: AppConfig = config_store.load();
        let sessions_today = data.pomodoro_history.count(clock.today_key());
        let pomodoro = PomodoroEngine::new(data.pomodoro_settings, sessions_today);
        Self {
            data,
            config,
            data_store,
            config_store,
            clock,
            pomodoro,
        }
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn today(&self) -> DateKey {
        self.clock.today_key()
    }

    fn save_data(&self) {
        if let Err(e) = self.data_store.save(&self.data) {
            tracing::error!(error = %e, "failed to save data");
        }
    }

    fn save_config(&self) {
        if let Err(e) = self.config_store.save(&self.config) {
            tracing::error!(error = %e, "failed to save config");
        }
    }

    fn saved_data_if(&self, changed: bool) -> bool {
        if changed {
            self.save_data();
        }
        changed
    }

    fn saved_config_if(&self, changed: bool) -> bool {
        if changed {
            self.save_config();
        }
        changed
    }

    // ── Widgets ──────────────────────────────────────────────────────

    pub fn widget(&self, name: WidgetName) -> WidgetState {
        self.config.widget(name)
    }

    pub fn set_color(&mut self, name: WidgetName, color: HexColor) -> bool {
        let changed = self.config.set_color(name, color);
        self.saved_config_if(changed)
    }

    pub fn set_position(&mut self, name: WidgetName, position: Position) -> bool {
        let changed = self.config.set_position(name, position);
        self.saved_config_if(changed)
    }

    pub fn set_size(&mut self, name: WidgetName, size: Size) -> bool {
        let changed = self.config.set_size(name, size);
        self.saved_config_if(changed)
    }

    pub fn set_expanded(&mut self, name: WidgetName, expanded: bool) -> bool {
        let changed = self.config.set_expanded(name, expanded);
        self.saved_config_if(changed)
    }

    pub fn toggle_expanded(&mut self, name: WidgetName) -> bool {
        let expanded = self.config.toggle_expanded(name);
        self.save_config();
        expanded
    }

    pub fn reset_layout(&mut self) -> bool {
        let changed = self.config.reset_layout();
        self.saved_config_if(changed)
    }

    // ── Calendar ─────────────────────────────────────────────────────

    pub fn events(&self, date: DateKey) -> &[String] {
        self.data.calendar_events.get(date)
    }

    pub fn add_event(&mut self, date: DateKey, text: &str) -> bool {
        let changed = self.data.calendar_events.add(date, text);
        self.saved_data_if(changed)
    }

    pub fn remove_event(&mut self, date: DateKey, index: usize) -> Option<String> {
        let removed = self.data.calendar_events.remove(date, index);
        self.saved_data_if(removed.is_some());
        removed
    }

    pub fn clear_events(&mut self, date: DateKey) -> usize {
        let removed = self.data.calendar_events.clear(date);
        self.saved_data_if(removed > 0);
        removed
    }

    // ── Plans ────────────────────────────────────────────────────────

    pub fn day_plan(&self, key: DayPlanKey) -> &str {
        self.data.day_plans.get(key)
    }

    /// Replace the hour slot's text; blank text clears it.
    pub fn set_day_plan(&mut self, key: DayPlanKey, text: &str) -> PlanWrite {
        let write = self.data.day_plans.set(key, text);
        self.saved_data_if(write.changed());
        write
    }

    pub fn plan(&self, kind: PlanKind, date: DateKey) -> &str {
        match kind {
            PlanKind::Weekly => self.data.weekly_plans.get(date),
            PlanKind::Monthly => self.data.monthly_plans.get(date),
        }
    }

    /// Replace the day's note; blank text clears it.
    pub fn set_plan(&mut self, kind: PlanKind, date: DateKey, text: &str) -> PlanWrite {
        let plans = match kind {
            PlanKind::Weekly => &mut self.data.weekly_plans,
            PlanKind::Monthly => &mut self.data.monthly_plans,
        };
        let write = plans.set(date, text);
        self.saved_data_if(write.changed());
        write
    }

    // ── Todos ────────────────────────────────────────────────────────

    pub fn todos(&self) -> &[TodoItem] {
        self.data.todos.items()
    }

    pub fn todo_add(&mut self, text: &str) -> bool {
        let changed = self.data.todos.add(text);
        self.saved_data_if(changed)
    }

    pub fn todo_toggle(&mut self, index: usize) -> Option<bool> {
        let done = self.data.todos.toggle(index);
        self.saved_data_if(done.is_some());
        done
    }

    pub fn todo_set_done(&mut self, index: usize, done: bool) -> bool {
        let changed = self.data.todos.set_done(index, done);
        self.saved_data_if(changed)
    }

    pub fn todo_delete(&mut self, index: usize) -> Option<TodoItem> {
        let removed = self.data.todos.delete(index);
        self.saved_data_if(removed.is_some());
        removed
    }

    pub fn todo_clear_completed(&mut self) -> usize {
        let removed = self.data.todos.clear_completed();
        self.saved_data_if(removed > 0);
        removed
    }

    pub fn todo_clear_all(&mut self) -> usize {
        let removed = self.data.todos.clear_all();
        self.saved_data_if(removed > 0);
        removed
    }

    // ── Pomodoro ─────────────────────────────────────────────────────

    /// The timer, with its daily count re-read for the current date.
    pub fn pomodoro(&mut self) -> &PomodoroEngine {
        self.sync_sessions_today();
        &self.pomodoro
    }

    pub fn pomodoro_start(&mut self) -> Option<Event> {
        self.sync_sessions_today();
        self.pomodoro.start()
    }

    pub fn pomodoro_pause(&mut self) -> Option<Event> {
        self.sync_sessions_today();
        self.pomodoro.pause()
    }

    pub fn pomodoro_toggle(&mut self) -> Event {
        self.sync_sessions_today();
        self.pomodoro.toggle()
    }

    /// One second of countdown; persists history when a focus phase ends.
    pub fn pomodoro_tick(&mut self) -> Option<Event> {
        self.sync_sessions_today();
        let today = self.today();
        let event = self.pomodoro.tick(&mut self.data.pomodoro_history, today)?;
        self.after_phase_event(&event);
        Some(event)
    }

    pub fn pomodoro_skip(&mut self) -> Event {
        self.sync_sessions_today();
        let today = self.today();
        let event = self.pomodoro.skip(&mut self.data.pomodoro_history, today);
        self.after_phase_event(&event);
        event
    }

    pub fn pomodoro_reset(&mut self) -> Event {
        self.sync_sessions_today();
        self.pomodoro.reset()
    }

    /// Validate, apply and persist new durations.
    ///
    /// # Errors
    /// Returns the validation error for out-of-range input; nothing changes.
    pub fn pomodoro_update_settings(
        &mut self,
        focus_minutes: i64,
        break_minutes: i64,
    ) -> Result<Event, ValidationError> {
        self.sync_sessions_today();
        let event = self.pomodoro.update_settings(focus_minutes, break_minutes)?;
        self.data.pomodoro_settings = self.pomodoro.settings();
        self.save_data();
        Ok(event)
    }

    /// Today's count, read straight from the history.
    pub fn sessions_today(&self) -> u32 {
        self.data.pomodoro_history.count(self.today())
    }

    pub fn recent_sessions(&self, days: u32) -> Vec<DayCount> {
        self.data.pomodoro_history.recent(self.today(), days)
    }

    /// The engine caches one day's count; the history is authoritative.
    fn sync_sessions_today(&mut self) {
        let today = self.today();
        self.pomodoro
            .refresh_sessions_today(&self.data.pomodoro_history, today);
    }

    fn after_phase_event(&mut self, event: &Event) {
        if let Event::PhaseCompleted {
            completed,
            sessions_today,
            ..
        } = event
        {
            tracing::info!(phase = ?completed, sessions_today, "pomodoro phase completed");
            if *completed == crate::timer::Phase::Focus {
                self.save_data();
            }
        }
    }
}

//! Ordered to-do list.
//!
//! Entries have no stable id; their position is their identity. Indexes come
//! from whatever the UI rendered last and may be stale, so every indexed
//! operation treats an out-of-range index as a no-op.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList(Vec<TodoItem>);

impl TodoList {
    /// Appends an open item. Blank text is rejected.
    pub fn add(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.0.push(TodoItem {
            text: text.to_string(),
            done: false,
        });
        true
    }

    /// Flips `done`; returns the new value.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let item = self.0.get_mut(index)?;
        item.done = !item.done;
        Some(item.done)
    }

    /// Checkbox form of [`toggle`](Self::toggle). Returns whether anything changed.
    pub fn set_done(&mut self, index: usize, done: bool) -> bool {
        match self.0.get_mut(index) {
            Some(item) if item.done != done => {
                item.done = done;
                true
            }
            _ => false,
        }
    }

    pub fn delete(&mut self, index: usize) -> Option<TodoItem> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    /// Drops finished items, keeping the rest in order. Returns how many went.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.0.len();
        self.0.retain(|item| !item.done);
        before - self.0.len()
    }

    pub fn clear_all(&mut self) -> usize {
        let removed = self.0.len();
        self.0.clear();
        removed
    }

    /// `(done, total)`
    pub fn progress(&self) -> (usize, usize) {
        let done = self.0.iter().filter(|item| item.done).count();
        (done, self.0.len())
    }

    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.0.get(index)
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

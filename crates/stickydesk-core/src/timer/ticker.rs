//! Periodic driver for the pomodoro countdown.
//!
//! At most one tick chain exists per [`Ticker`]. It runs while the engine is
//! running and ends by itself at a phase boundary or once the engine is
//! paused. Every tick locks the shared [`Desk`], so the ticker and the host
//! never mutate the documents concurrently.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::desk::Desk;
use crate::events::Event;

/// The single exclusive owner of the documents, shared with the ticker.
pub type SharedDesk = Arc<Mutex<Desk>>;

pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

/// Shortest period a ticker accepts; tokio intervals cannot be zero.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Lock the desk, recovering the guard if a previous holder panicked.
pub fn lock_desk(desk: &Mutex<Desk>) -> MutexGuard<'_, Desk> {
    desk.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct Ticker {
    desk: SharedDesk,
    events: mpsc::UnboundedSender<Event>,
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(desk: SharedDesk, events: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            desk,
            events,
            period: TICK_PERIOD,
            task: None,
        }
    }

    /// Periods below [`MIN_TICK_PERIOD`] are raised to it.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period.max(MIN_TICK_PERIOD);
        self
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Spawn the tick chain. Returns `false` if one is already active.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        let desk = Arc::clone(&self.desk);
        let events = self.events.clone();
        let period = self.period;

        self.task = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let event = {
                    let mut guard = lock_desk(&desk);
                    if !guard.pomodoro().is_running() {
                        break;
                    }
                    guard.pomodoro_tick()
                };
                let Some(event) = event else { break };
                let finished = event.is_phase_completed();
                if events.send(event).is_err() {
                    tracing::trace!("no listener for timer events");
                }
                if finished {
                    break;
                }
            }
        }));
        true
    }

    /// Abort the tick chain. Returns `false` if none was active.
    pub fn stop(&mut self) -> bool {
        match self.task.take() {
            Some(task) if !task.is_finished() => {
                task.abort();
                true
            }
            _ => false,
        }
    }

    /// Wait for the current tick chain to end on its own.
    pub async fn join(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::error!(error = %e, "ticker task failed");
                }
            }
        }
    }

    /// Start the engine and begin ticking.
    pub fn start_timer(&mut self) -> Option<Event> {
        let event = lock_desk(&self.desk).pomodoro_start();
        self.start();
        event
    }

    /// Pause the engine and stop ticking.
    pub fn pause_timer(&mut self) -> Option<Event> {
        let event = lock_desk(&self.desk).pomodoro_pause();
        self.stop();
        event
    }

    /// The start/pause button.
    pub fn toggle_timer(&mut self) -> Event {
        let running = lock_desk(&self.desk).pomodoro().is_running();
        let event = if running {
            self.pause_timer()
        } else {
            self.start_timer()
        };
        event.unwrap_or_else(|| lock_desk(&self.desk).pomodoro().snapshot())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

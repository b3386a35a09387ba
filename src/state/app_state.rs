//! Main application state management

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;

use super::{EditMode, EditingSession, ExerciseStore, RunSession, TickEvent};
use crate::{
    api::responses::{AppView, EditorView, RunView},
    tasks::TimerHandle,
    validation::ValidationRules,
};

/// Owns the exercise list and both modal sessions.
///
/// All mutation happens on the single thread driving the event loop; the
/// watch channel publishes a fresh view after every change so a renderer can
/// follow along.
pub struct App {
    pub store: ExerciseStore,
    pub editing: EditingSession,
    pub run: RunSession,
    pub rules: ValidationRules,
    /// Last action tracking
    last_action: Option<String>,
    last_action_time: Option<DateTime<Utc>>,
    /// Channel for view updates
    view_tx: watch::Sender<AppView>,
    /// Keep the receiver alive to prevent channel closure
    _view_rx: watch::Receiver<AppView>,
}

impl App {
    pub fn new(store: ExerciseStore, run: RunSession, rules: ValidationRules) -> Self {
        let (view_tx, view_rx) = watch::channel(AppView::default());
        let app = Self {
            store,
            editing: EditingSession::new(),
            run,
            rules,
            last_action: None,
            last_action_time: None,
            view_tx,
            _view_rx: view_rx,
        };
        app.publish();
        app
    }

    /// Subscribe to view updates
    pub fn subscribe(&self) -> watch::Receiver<AppView> {
        self.view_tx.subscribe()
    }

    /// Remember the action that caused the next state change
    pub fn record_action(&mut self, action: &str) {
        self.last_action = Some(action.to_string());
        self.last_action_time = Some(Utc::now());
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        (self.last_action.clone(), self.last_action_time)
    }

    /// Feed a scheduler tick into the run session
    pub fn on_tick(&mut self, handle: TimerHandle) -> Option<TickEvent> {
        let event = self.run.on_tick(handle)?;
        self.publish();
        Some(event)
    }

    /// Build the snapshot a renderer consumes
    pub fn view(&self) -> AppView {
        let draft = self.editing.draft();
        let editor = EditorView {
            mode: self.editing.mode(),
            name: draft.name.clone(),
            seconds: draft.seconds.clone(),
            errors: self.editing.field_errors(&self.rules),
            can_save: self.editing.can_save(&self.rules),
        };

        let running = self.run.running_id().and_then(|id| self.store.get(id));
        let run = RunView {
            running_id: running.map(|r| r.id),
            running_name: running.map(|r| r.name.clone()),
            interval_seconds: running.map(|r| r.tick_seconds()),
            current_count: self.run.count(),
            max_ticks: self.run.max_ticks(),
            active: self.run.is_running(),
        };

        AppView {
            exercises: self.store.list().to_vec(),
            editor,
            run,
            last_action: self.last_action.clone(),
            last_action_time: self.last_action_time,
        }
    }

    /// Push the current view to subscribers
    pub fn publish(&self) {
        self.view_tx.send_replace(self.view());
    }

    /// Drop modal state that refers to a record which no longer exists
    pub fn forget_exercise(&mut self, id: u64) {
        if self.run.running_id() == Some(id) {
            debug!("Closing run session for removed exercise {}", id);
            self.run.close();
        }
        if self.editing.mode() == EditMode::Editing(id) {
            debug!("Closing edit modal for removed exercise {}", id);
            self.editing.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        state::{DEFAULT_MAX_TICKS, DEFAULT_STORAGE_KEY},
        storage::MemoryBlobStore,
        tasks::ManualScheduler,
    };

    fn app(clock: &ManualScheduler) -> App {
        let store = ExerciseStore::new(Box::new(MemoryBlobStore::new()), DEFAULT_STORAGE_KEY);
        let run = RunSession::new(Box::new(clock.clone()), DEFAULT_MAX_TICKS);
        App::new(store, run, ValidationRules::default())
    }

    #[test]
    fn test_view_reflects_run_state() {
        let clock = ManualScheduler::new();
        let mut app = app(&clock);
        let id = app.store.add("Plank", Some(2.5)).id;
        app.run.open(id, &app.store);
        app.run.start(&app.store);

        let mut rx = app.subscribe();
        for handle in clock.advance(Duration::from_secs(5)) {
            app.on_tick(handle);
        }

        assert!(rx.has_changed().unwrap());
        let view = rx.borrow_and_update().clone();
        assert_eq!(view.run.running_name.as_deref(), Some("Plank"));
        assert_eq!(view.run.interval_seconds, Some(2.5));
        assert_eq!(view.run.current_count, 2);
        assert!(view.run.active);
    }

    #[test]
    fn test_forget_exercise_closes_sessions() {
        let clock = ManualScheduler::new();
        let mut app = app(&clock);
        let id = app.store.add("Plank", Some(2.5)).id;
        app.run.open(id, &app.store);
        app.run.start(&app.store);
        app.editing.open_edit(id, &app.store);

        app.forget_exercise(id);
        assert_eq!(app.run.running_id(), None);
        assert_eq!(app.editing.mode(), EditMode::Closed);
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn test_record_action() {
        let clock = ManualScheduler::new();
        let mut app = app(&clock);
        assert_eq!(app.get_last_action(), (None, None));

        app.record_action("add");
        let (action, time) = app.get_last_action();
        assert_eq!(action.as_deref(), Some("add"));
        assert!(time.is_some());
    }
}

//! State management module
//!
//! This module contains the exercise list, the two modal state machines and
//! the application state that ties them together.

pub mod app_state;
pub mod editing;
pub mod exercise;
pub mod run_session;
pub mod store;

// Re-export main types
pub use app_state::App;
pub use editing::{Draft, EditMode, EditingSession, FieldErrors, SaveOutcome};
pub use exercise::{ExerciseRecord, DEFAULT_TICK_SECONDS};
pub use run_session::{LogTicks, RunPhase, RunSession, TickEvent, TickObserver, DEFAULT_MAX_TICKS};
pub use store::{ExerciseStore, DEFAULT_STORAGE_KEY};

//! Exercise Counter - timed repeat counters for exercises
//!
//! This library provides the exercise list with best-effort local
//! persistence, the add/edit modal with its validation rules, and the
//! interval-driven run session that counts ticks up to a cap.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod tasks;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use api::{handle_intent, Intent, Outcome};
pub use config::Config;
pub use error::{Field, StorageError, ValidationError};
pub use state::{App, ExerciseRecord, ExerciseStore, RunSession};
pub use utils::signals::shutdown_signal;
pub use validation::{validate, ValidationRules};

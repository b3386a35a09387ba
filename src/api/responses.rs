//! Dispatch outcomes and renderable views

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::{EditMode, ExerciseRecord, FieldErrors};

/// How a dispatched intent ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Ok,
    /// Validation failed; nothing changed
    Rejected,
    /// The id no longer resolves; nothing changed
    NotFound,
    /// The user declined a confirmation
    Cancelled,
    /// The intent does not apply in the current state
    Ignored,
}

/// Response to a dispatched intent
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub status: OutcomeStatus,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Outcome {
    /// Create a new outcome
    pub fn new(status: OutcomeStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(OutcomeStatus::Ok, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(OutcomeStatus::Rejected, message)
    }

    pub fn not_found(id: u64) -> Self {
        Self::new(OutcomeStatus::NotFound, format!("Exercise {} not found", id))
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(OutcomeStatus::Cancelled, message)
    }

    pub fn ignored(message: impl Into<String>) -> Self {
        Self::new(OutcomeStatus::Ignored, message)
    }

    pub fn is_ok(&self) -> bool {
        self.status == OutcomeStatus::Ok
    }
}

/// Add/edit modal as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorView {
    #[serde(flatten)]
    pub mode: EditMode,
    pub name: String,
    pub seconds: String,
    pub errors: FieldErrors,
    pub can_save: bool,
}

impl Default for EditorView {
    fn default() -> Self {
        Self {
            mode: EditMode::Closed,
            name: String::new(),
            seconds: String::new(),
            errors: FieldErrors::default(),
            can_save: false,
        }
    }
}

/// Run modal as the renderer sees it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunView {
    pub running_id: Option<u64>,
    pub running_name: Option<String>,
    pub interval_seconds: Option<f64>,
    pub current_count: u32,
    pub max_ticks: u32,
    /// A timer is currently ticking
    pub active: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppView {
    pub exercises: Vec<ExerciseRecord>,
    pub editor: EditorView,
    pub run: RunView,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

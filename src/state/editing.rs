//! Add/edit modal state machine

use serde::Serialize;
use tracing::{debug, info};

use super::{ExerciseRecord, ExerciseStore};
use crate::{
    error::{Field, ValidationError},
    validation::{validate_name, validate_seconds, ValidDraft, ValidationRules},
};

/// Which record, if any, the modal is working on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "id", rename_all = "lowercase")]
pub enum EditMode {
    Closed,
    Adding,
    Editing(u64),
}

/// Unsaved working copy of the modal's fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub seconds: String,
    pub name_touched: bool,
    pub seconds_touched: bool,
}

impl Draft {
    fn from_record(record: &ExerciseRecord) -> Self {
        Self {
            name: record.name.clone(),
            seconds: record.seconds.map(|s| s.to_string()).unwrap_or_default(),
            ..Self::default()
        }
    }

    fn touched(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name_touched,
            Field::Seconds => self.seconds_touched,
        }
    }
}

/// Errors visible next to each field right now
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub seconds: Option<String>,
}

/// Result of a save attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Added(ExerciseRecord),
    Updated(u64),
    Invalid(ValidationError),
    /// The record being edited no longer exists; the modal was closed
    NotFound(u64),
    /// No modal was open
    NotOpen,
}

/// Tracks the add/edit modal and its draft
#[derive(Debug)]
pub struct EditingSession {
    mode: EditMode,
    draft: Draft,
    placeholder_name: String,
}

impl EditingSession {
    pub fn new() -> Self {
        Self {
            mode: EditMode::Closed,
            draft: Draft::default(),
            placeholder_name: String::new(),
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn is_open(&self) -> bool {
        self.mode != EditMode::Closed
    }

    /// Open the modal for a new exercise with a generated name
    pub fn open_add(&mut self, store: &ExerciseStore) -> bool {
        if self.is_open() {
            debug!("Add ignored, modal already open ({:?})", self.mode);
            return false;
        }
        self.placeholder_name = format!("Exercise {}", store.next_id());
        self.draft = Draft {
            name: self.placeholder_name.clone(),
            ..Draft::default()
        };
        self.mode = EditMode::Adding;
        debug!("Opened add modal");
        true
    }

    /// Open the modal pre-filled from an existing record
    pub fn open_edit(&mut self, id: u64, store: &ExerciseStore) -> bool {
        if self.is_open() {
            debug!("Edit ignored, modal already open ({:?})", self.mode);
            return false;
        }
        let Some(record) = store.get(id) else {
            debug!("Edit ignored, exercise {} not found", id);
            return false;
        };
        self.placeholder_name = record.name.clone();
        self.draft = Draft::from_record(record);
        self.mode = EditMode::Editing(id);
        debug!("Opened edit modal for exercise {}", id);
        true
    }

    /// Discard the draft without touching the store
    pub fn close(&mut self) {
        if self.is_open() {
            debug!("Closed modal ({:?})", self.mode);
        }
        self.mode = EditMode::Closed;
        self.draft = Draft::default();
        self.placeholder_name.clear();
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.draft.name = value.into();
        self.draft.name_touched = true;
    }

    pub fn set_seconds(&mut self, value: impl Into<String>) {
        self.draft.seconds = value.into();
        self.draft.seconds_touched = true;
    }

    /// Mark a field as interacted with (blur)
    pub fn touch(&mut self, field: Field) {
        match field {
            Field::Name => self.draft.name_touched = true,
            Field::Seconds => self.draft.seconds_touched = true,
        }
    }

    pub fn validate(&self, rules: &ValidationRules) -> Result<ValidDraft, ValidationError> {
        rules.validate(&self.draft.name, &self.draft.seconds)
    }

    /// Per-field errors, shown only for touched fields
    pub fn field_errors(&self, rules: &ValidationRules) -> FieldErrors {
        if !self.is_open() {
            return FieldErrors::default();
        }
        let visible = |field: Field, result: Result<(), ValidationError>| {
            result
                .err()
                .filter(|_| self.draft.touched(field))
                .map(|e| e.message)
        };
        FieldErrors {
            name: visible(Field::Name, validate_name(&self.draft.name).map(|_| ())),
            seconds: visible(
                Field::Seconds,
                validate_seconds(&self.draft.seconds, rules.min_seconds, rules.max_seconds)
                    .map(|_| ()),
            ),
        }
    }

    pub fn can_save(&self, rules: &ValidationRules) -> bool {
        self.is_open() && self.validate(rules).is_ok()
    }

    /// Validate the draft and apply it to the store
    pub fn save(&mut self, store: &mut ExerciseStore, rules: &ValidationRules) -> SaveOutcome {
        if !self.is_open() {
            return SaveOutcome::NotOpen;
        }
        let ValidDraft { name, seconds } = match self.validate(rules) {
            Ok(valid) => valid,
            Err(e) => {
                debug!("Save rejected: {}", e);
                return SaveOutcome::Invalid(e);
            }
        };

        let outcome = match self.mode {
            EditMode::Adding => {
                let name = if name.is_empty() {
                    self.placeholder_name.clone()
                } else {
                    name
                };
                SaveOutcome::Added(store.add(name, Some(seconds)))
            }
            EditMode::Editing(id) => {
                if store.update(id, name, Some(seconds)) {
                    SaveOutcome::Updated(id)
                } else {
                    info!("Exercise {} vanished while editing, closing modal", id);
                    SaveOutcome::NotFound(id)
                }
            }
            EditMode::Closed => SaveOutcome::NotOpen,
        };

        self.close();
        outcome
    }
}

impl Default for EditingSession {
    fn default() -> Self {
        Self::new()
    }
}

//! Error types shared across the crate

use std::fmt;

use thiserror::Error;

/// Failures of a blob store backend.
///
/// These never escape the exercise store: they are logged and the store keeps
/// operating on its in-memory list.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read/write blob: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize blob: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

/// Draft field a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Seconds,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Seconds => write!(f, "seconds"),
        }
    }
}

/// A user-correctable problem with a draft, keyed to the offending field
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

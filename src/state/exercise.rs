//! Exercise record structure

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Interval used when an exercise has no usable duration
pub const DEFAULT_TICK_SECONDS: f64 = 1.0;

/// One timed repeat counter as shown in the list and persisted to storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Unique, monotonically assigned id
    pub id: u64,
    /// Display name, trimmed and non-empty
    pub name: String,
    /// Tick interval in seconds; `None` means the default interval
    #[serde(default)]
    pub seconds: Option<f64>,
}

impl ExerciseRecord {
    pub fn new(id: u64, name: impl Into<String>, seconds: Option<f64>) -> Self {
        Self {
            id,
            name: name.into(),
            seconds,
        }
    }

    /// Interval a run of this exercise ticks at.
    ///
    /// Missing, non-positive or non-finite durations fall back to one second.
    pub fn tick_seconds(&self) -> f64 {
        match self.seconds {
            Some(seconds) if seconds.is_finite() && seconds > 0.0 => seconds,
            _ => DEFAULT_TICK_SECONDS,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.tick_seconds())
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_TICK_SECONDS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_seconds_fallbacks() {
        assert_eq!(ExerciseRecord::new(1, "a", Some(2.5)).tick_seconds(), 2.5);
        assert_eq!(ExerciseRecord::new(1, "a", None).tick_seconds(), 1.0);
        assert_eq!(ExerciseRecord::new(1, "a", Some(0.0)).tick_seconds(), 1.0);
        assert_eq!(ExerciseRecord::new(1, "a", Some(-4.0)).tick_seconds(), 1.0);
        assert_eq!(ExerciseRecord::new(1, "a", Some(f64::NAN)).tick_seconds(), 1.0);
    }

    #[test]
    fn test_serialized_layout() {
        let json = serde_json::to_string(&ExerciseRecord::new(3, "Plank", None)).unwrap();
        assert_eq!(json, r#"{"id":3,"name":"Plank","seconds":null}"#);

        let parsed: ExerciseRecord = serde_json::from_str(r#"{"id":4,"name":"Sit-ups"}"#).unwrap();
        assert_eq!(parsed.seconds, None);
    }
}

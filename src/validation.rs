//! Draft validation rules
//!
//! Everything here is pure: the editing session calls these on every
//! keystroke to drive inline errors and to gate saving.

use crate::error::{Field, ValidationError};

/// Longest accepted exercise name, counted after trimming
pub const MAX_NAME_LEN: usize = 17;

/// Accepted range for an exercise interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationRules {
    pub min_seconds: f64,
    pub max_seconds: f64,
}

impl ValidationRules {
    pub fn new(min_seconds: f64, max_seconds: f64) -> Self {
        Self {
            min_seconds,
            max_seconds,
        }
    }

    pub fn validate(&self, name: &str, seconds_raw: &str) -> Result<ValidDraft, ValidationError> {
        validate(name, seconds_raw, self.min_seconds, self.max_seconds)
    }

    /// Whether an already parsed interval lies within the range
    pub fn accepts_seconds(&self, seconds: f64) -> bool {
        seconds.is_finite() && seconds >= self.min_seconds && seconds <= self.max_seconds
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::new(1.5, 10.0)
    }
}

/// A draft that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub name: String,
    pub seconds: f64,
}

/// Validate a candidate name/duration pair
pub fn validate(
    name: &str,
    seconds_raw: &str,
    min_seconds: f64,
    max_seconds: f64,
) -> Result<ValidDraft, ValidationError> {
    let name = validate_name(name)?;
    let seconds = validate_seconds(seconds_raw, min_seconds, max_seconds)?;
    Ok(ValidDraft { name, seconds })
}

/// Check the name field alone, returning the trimmed name
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(Field::Name, "Name is required"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::new(
            Field::Name,
            format!("Name must be ≤{} characters", MAX_NAME_LEN),
        ));
    }
    Ok(trimmed.to_string())
}

/// Check the seconds field alone, returning the parsed value
pub fn validate_seconds(
    seconds_raw: &str,
    min_seconds: f64,
    max_seconds: f64,
) -> Result<f64, ValidationError> {
    let raw = seconds_raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::new(Field::Seconds, "Seconds is required"));
    }

    // "NaN" and "inf" parse as f64 but are not usable intervals
    let seconds = match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            return Err(ValidationError::new(
                Field::Seconds,
                "Seconds must be a number",
            ))
        }
    };

    if seconds < min_seconds {
        return Err(ValidationError::new(
            Field::Seconds,
            format!("Minimum seconds is {}", min_seconds),
        ));
    }
    if seconds > max_seconds {
        return Err(ValidationError::new(
            Field::Seconds,
            format!("Maximum seconds is {}", max_seconds),
        ));
    }

    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ValidationRules {
        ValidationRules::new(1.5, 10.0)
    }

    #[test]
    fn test_accepts_valid_draft() {
        let draft = rules().validate("  Push-ups ", "2").unwrap();
        assert_eq!(draft.name, "Push-ups");
        assert_eq!(draft.seconds, 2.0);
    }

    #[test]
    fn test_name_required() {
        let err = rules().validate("   ", "2").unwrap_err();
        assert_eq!(err.field, Field::Name);
        assert_eq!(err.message, "Name is required");
    }

    #[test]
    fn test_name_length_boundary() {
        let seventeen = "a".repeat(17);
        assert!(rules().validate(&seventeen, "2").is_ok());

        let padded = format!("  {}  ", seventeen);
        assert!(rules().validate(&padded, "2").is_ok());

        let eighteen = "a".repeat(18);
        let err = rules().validate(&eighteen, "2").unwrap_err();
        assert_eq!(err.message, "Name must be ≤17 characters");
    }

    #[test]
    fn test_name_length_counts_characters_not_bytes() {
        let name = "é".repeat(17);
        assert!(rules().validate(&name, "2").is_ok());
    }

    #[test]
    fn test_seconds_required() {
        let err = rules().validate("Squats", "  ").unwrap_err();
        assert_eq!(err.field, Field::Seconds);
        assert_eq!(err.message, "Seconds is required");
    }

    #[test]
    fn test_seconds_must_be_number() {
        for raw in ["abc", "1.2.3", "NaN", "inf", "-inf"] {
            let err = rules().validate("Squats", raw).unwrap_err();
            assert_eq!(err.message, "Seconds must be a number", "input {raw:?}");
        }
    }

    #[test]
    fn test_seconds_range_and_boundaries() {
        assert!(rules().validate("Squats", "1.5").is_ok());
        assert!(rules().validate("Squats", "10").is_ok());

        let err = rules().validate("Squats", "1.4").unwrap_err();
        assert_eq!(err.message, "Minimum seconds is 1.5");

        let err = rules().validate("Squats", "10.01").unwrap_err();
        assert_eq!(err.message, "Maximum seconds is 10");

        let err = rules().validate("Squats", "-3").unwrap_err();
        assert_eq!(err.message, "Minimum seconds is 1.5");
    }

    #[test]
    fn test_range_is_configurable() {
        let loose = ValidationRules::new(0.5, 10.0);
        assert!(loose.validate("Squats", "0.5").is_ok());
        assert!(rules().validate("Squats", "0.5").is_err());
    }

    #[test]
    fn test_name_checked_before_seconds() {
        let err = rules().validate("", "").unwrap_err();
        assert_eq!(err.field, Field::Name);
    }

    #[test]
    fn test_validation_is_repeatable() {
        let first = rules().validate("Lunges", "3");
        let second = rules().validate("Lunges", "3");
        assert_eq!(first, second);
    }
}

//! Common validation utilities.

use validator::ValidationError;

/// Accepted priority values, lowercase.
pub const PRIORITY_VALUES: [&str; 3] = ["high", "medium", "low"];

/// Message returned when any required field is missing or blank.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// Validates that a value contains at least one non-whitespace character.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some(REQUIRED_FIELDS_MESSAGE.into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that a priority is one of `high`, `medium`, `low` (case-insensitive).
///
/// Blank values are reported as missing rather than invalid.
pub fn validate_priority(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;

    let normalized = value.trim().to_ascii_lowercase();
    if PRIORITY_VALUES.contains(&normalized.as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("priority");
        err.message = Some("Priority must be one of: high, medium, low".into());
        Err(err)
    }
}

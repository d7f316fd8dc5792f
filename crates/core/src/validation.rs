//! Field validation for create payloads.
//!
//! Each function returns `CoreError::Validation` with a message naming the
//! offending field.

use crate::error::CoreError;

/// Longest accepted title for donations and requests.
pub const MAX_TITLE_LEN: usize = 200;

/// Longest accepted free-text note on a status change.
pub const MAX_NOTE_LEN: usize = 1000;

/// Profile roles accepted by the `profiles.role` column.
pub const VALID_ROLES: &[&str] = &["donor", "recipient", "volunteer", "admin"];

/// Request urgencies accepted by the `requests.urgency` column.
pub const VALID_URGENCIES: &[&str] = &["low", "normal", "high", "critical"];

/// Require a non-blank value no longer than `max_len` characters.
pub fn validate_required(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// Reject an optional value longer than `max_len` characters.
pub fn validate_max_len(field: &str, value: Option<&str>, max_len: usize) -> Result<(), CoreError> {
    match value {
        Some(v) if v.chars().count() > max_len => Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        ))),
        _ => Ok(()),
    }
}

/// Require `value` to be one of `allowed`.
pub fn validate_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

/// Require a strictly positive quantity.
pub fn validate_positive(field: &str, value: i32) -> Result<(), CoreError> {
    if value > 0 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("{field} must be positive")))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn blank_required_field_is_rejected() {
        assert_matches!(
            validate_required("title", "   ", MAX_TITLE_LEN),
            Err(CoreError::Validation(msg)) if msg == "title must not be empty"
        );
    }

    #[test]
    fn overlong_required_field_is_rejected() {
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(validate_required("title", &long, MAX_TITLE_LEN).is_err());
        assert!(validate_required("title", "Winter coats", MAX_TITLE_LEN).is_ok());
    }

    #[test]
    fn optional_field_only_checks_length() {
        assert!(validate_max_len("note", None, 5).is_ok());
        assert!(validate_max_len("note", Some("short"), 5).is_ok());
        assert!(validate_max_len("note", Some("longer"), 5).is_err());
    }

    #[test]
    fn one_of_lists_allowed_values() {
        assert!(validate_one_of("role", "donor", VALID_ROLES).is_ok());
        assert_matches!(
            validate_one_of("role", "system", VALID_ROLES),
            Err(CoreError::Validation(msg)) if msg.contains("donor, recipient, volunteer, admin")
        );
    }

    #[test]
    fn quantity_must_be_positive() {
        assert!(validate_positive("quantity", 1).is_ok());
        assert!(validate_positive("quantity", 0).is_err());
        assert!(validate_positive("quantity", -3).is_err());
    }
}

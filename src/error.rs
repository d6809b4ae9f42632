// Validation errors surfaced to the user

use thiserror::Error;

/// The one user-visible error class: a rejected `add_task`.
///
/// Nothing is mutated when validation fails; the operation is retriable after
/// correcting the input. All other store operations are no-ops on missing
/// identity rather than errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task text cannot be empty")]
    EmptyText,
    #[error("due date must be a real calendar date in YYYY-MM-DD form, got {0:?}")]
    InvalidDueDate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(ValidationError::EmptyText.to_string(), "task text cannot be empty");

        let err = ValidationError::InvalidDueDate("not-a-date".to_string());
        assert!(err.to_string().contains("not-a-date"));
    }
}

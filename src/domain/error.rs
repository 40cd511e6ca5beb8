use thiserror::Error;

use crate::domain::user::FieldViolation;

/// Core domain errors.
///
/// Expected business failures are enumerated variants so the transport layer
/// can map each kind to a status code without inspecting message text. All
/// variants are terminal for the request; nothing is retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// The payload carried no identifier and no fields at all
    #[error("no data is submitted")]
    EmptyPayload,

    /// Path identifier and payload identifier disagree
    #[error("key field parameters mismatch")]
    KeyFieldMismatch,

    /// Referenced record does not exist
    #[error("record is not found")]
    NotFound,

    /// Computed age does not strictly exceed the configured minimum
    #[error("birth date is less than the minimum age of {min_age}")]
    BelowMinimumAge { min_age: u32 },

    /// Range query bounds out of order (start must be strictly before end)
    #[error("start date is not before end date")]
    StartDateNotBeforeEndDate,

    /// One or more field-level constraint violations
    #[error("validation failed with {} violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    /// Persistence gateway failure
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn below_minimum_age(min_age: u32) -> Self {
        Self::BelowMinimumAge { min_age }
    }

    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation(violations)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(DomainError::EmptyPayload.to_string(), "no data is submitted");
        assert_eq!(DomainError::NotFound.to_string(), "record is not found");
        assert_eq!(
            DomainError::below_minimum_age(18).to_string(),
            "birth date is less than the minimum age of 18"
        );
        assert_eq!(
            DomainError::storage("connection reset").to_string(),
            "storage error: connection reset"
        );
    }

    #[test]
    fn test_validation_counts_violations() {
        let error = DomainError::validation(vec![
            FieldViolation::new("email", "Email is required."),
            FieldViolation::new("lastName", "Last name is required."),
        ]);

        assert_eq!(error.to_string(), "validation failed with 2 violation(s)");
    }
}

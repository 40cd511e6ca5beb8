//! API error response types and the domain error -> status mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::user::FieldViolation;
use crate::domain::DomainError;

pub const NO_DATA_SUBMITTED: &str = "No data is submitted.";
pub const KEY_FIELD_PARAMETERS_MISMATCH: &str = "Key field parameters mismatch.";
pub const RECORD_NOT_FOUND: &str = "Record is not found.";
pub const START_DATE_IS_NOT_BEFORE_END_DATE: &str = "The start date is not before end date.";
pub const INTERNAL_ERROR: &str = "Internal server error.";

/// The full error response body: an ordered list of field violations.
///
/// Serialized as `{"errors": [{"fieldName": "...", "message": "..."}]}`;
/// `fieldName` is the empty string for whole-payload errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDto {
    pub errors: Vec<FieldViolation>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ApiErrorDto,
}

impl ApiError {
    /// Create a new API error with a single violation
    pub fn new(status: StatusCode, field_name: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorDto {
                errors: vec![FieldViolation::new(field_name, message)],
            },
        }
    }

    /// Bad request with a whole-payload or keyed violation
    pub fn bad_request(field_name: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, field_name, message)
    }

    /// Not found for the standard record-missing case
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "userId", RECORD_NOT_FOUND)
    }

    /// Unprocessable entity carrying every collected violation
    pub fn unprocessable(violations: Vec<FieldViolation>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: ApiErrorDto { errors: violations },
        }
    }

    /// Internal server error
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "", INTERNAL_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::EmptyPayload => Self::bad_request("", NO_DATA_SUBMITTED),
            DomainError::KeyFieldMismatch => {
                Self::bad_request("userId", KEY_FIELD_PARAMETERS_MISMATCH)
            }
            DomainError::NotFound => Self::not_found(),
            DomainError::BelowMinimumAge { min_age } => Self::unprocessable(vec![
                FieldViolation::new("birthDate", below_minimum_age_message(min_age)),
            ]),
            DomainError::StartDateNotBeforeEndDate => {
                Self::bad_request("", START_DATE_IS_NOT_BEFORE_END_DATE)
            }
            DomainError::Validation(violations) => Self::unprocessable(violations),
            DomainError::Storage { message } => {
                tracing::error!(error = %message, "Storage failure");
                Self::internal()
            }
        }
    }
}

/// Minimum-age message formatted with the configured threshold
pub fn below_minimum_age_message(min_age: u32) -> String {
    format!("The birth date is less than {}.", min_age)
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.status)?;
        for error in &self.body.errors {
            write!(f, " {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_maps_to_bad_request_with_blank_field() {
        let api_err: ApiError = DomainError::EmptyPayload.into();

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            api_err.body.errors,
            vec![FieldViolation::new("", NO_DATA_SUBMITTED)]
        );
    }

    #[test]
    fn test_key_mismatch_maps_to_bad_request_on_user_id() {
        let api_err: ApiError = DomainError::KeyFieldMismatch.into();

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            api_err.body.errors,
            vec![FieldViolation::new("userId", KEY_FIELD_PARAMETERS_MISMATCH)]
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let api_err: ApiError = DomainError::NotFound.into();

        assert_eq!(api_err.status, StatusCode::NOT_FOUND);
        assert_eq!(
            api_err.body.errors,
            vec![FieldViolation::new("userId", RECORD_NOT_FOUND)]
        );
    }

    #[test]
    fn test_below_minimum_age_maps_to_422_with_configured_age() {
        let api_err: ApiError = DomainError::below_minimum_age(21).into();

        assert_eq!(api_err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            api_err.body.errors,
            vec![FieldViolation::new(
                "birthDate",
                "The birth date is less than 21."
            )]
        );
    }

    #[test]
    fn test_date_range_maps_to_bad_request() {
        let api_err: ApiError = DomainError::StartDateNotBeforeEndDate.into();

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            api_err.body.errors,
            vec![FieldViolation::new("", START_DATE_IS_NOT_BEFORE_END_DATE)]
        );
    }

    #[test]
    fn test_validation_maps_to_422_preserving_all_violations() {
        let violations = vec![
            FieldViolation::new("email", "Email is required."),
            FieldViolation::new("birthDate", "Birth date is required."),
        ];

        let api_err: ApiError = DomainError::validation(violations.clone()).into();

        assert_eq!(api_err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_err.body.errors, violations);
    }

    #[test]
    fn test_storage_maps_to_500_without_leaking_detail() {
        let api_err: ApiError = DomainError::storage("connection refused").into();

        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            api_err.body.errors,
            vec![FieldViolation::new("", INTERNAL_ERROR)]
        );
    }

    #[test]
    fn test_error_body_serialization_shape() {
        let api_err: ApiError = DomainError::KeyFieldMismatch.into();
        let json = serde_json::to_value(&api_err.body).unwrap();

        assert_eq!(json["errors"][0]["fieldName"], "userId");
        assert_eq!(json["errors"][0]["message"], "Key field parameters mismatch.");
    }
}

//! Field-level validation for user records

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::entity::User;

pub const INVALID_EMAIL_FORMAT: &str = "Invalid email format.";
pub const EMAIL_IS_REQUIRED: &str = "Email is required.";
pub const FIRST_NAME_IS_REQUIRED: &str = "First name is required.";
pub const LAST_NAME_IS_REQUIRED: &str = "Last name is required.";
pub const BIRTH_DATE_IS_REQUIRED: &str = "Birth date is required.";
pub const BIRTH_DATE_NOT_IN_PAST: &str = "Birth date must be earlier than current date.";

/// A single violated constraint: the offending field and a human-readable
/// message. Field name is empty for whole-payload failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    pub field_name: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.field_name.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field_name, self.message)
        }
    }
}

/// Validation engine for user records.
///
/// Constructed once at startup and passed into the service. Every constraint
/// is evaluated on each pass; all violations are collected and returned
/// together rather than stopping at the first failure.
///
/// Constraints:
/// - `email`: present, non-blank, syntactically valid
/// - `firstName`, `lastName`: present, non-blank
/// - `birthDate`: present, strictly before the current date
#[derive(Debug, Clone, Copy, Default)]
pub struct UserValidator;

impl UserValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate against the current date
    pub fn validate(&self, user: &User) -> Vec<FieldViolation> {
        self.validate_at(user, Utc::now().date_naive())
    }

    /// Validate against an explicit "today" so tests stay deterministic
    pub fn validate_at(&self, user: &User, today: NaiveDate) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        match user.email.as_deref() {
            None => violations.push(FieldViolation::new("email", EMAIL_IS_REQUIRED)),
            Some(email) if email.trim().is_empty() => {
                violations.push(FieldViolation::new("email", EMAIL_IS_REQUIRED));
            }
            Some(email) => {
                if !email.validate_email() {
                    violations.push(FieldViolation::new("email", INVALID_EMAIL_FORMAT));
                }
            }
        }

        if is_blank(&user.first_name) {
            violations.push(FieldViolation::new("firstName", FIRST_NAME_IS_REQUIRED));
        }

        if is_blank(&user.last_name) {
            violations.push(FieldViolation::new("lastName", LAST_NAME_IS_REQUIRED));
        }

        match user.birth_date {
            None => violations.push(FieldViolation::new("birthDate", BIRTH_DATE_IS_REQUIRED)),
            Some(birth_date) => {
                if birth_date >= today {
                    violations.push(FieldViolation::new("birthDate", BIRTH_DATE_NOT_IN_PAST));
                }
            }
        }

        violations
    }
}

fn is_blank(value: &Option<String>) -> bool {
    match value.as_deref() {
        Some(s) => s.trim().is_empty(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;
    use chrono::Days;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn valid_user() -> User {
        User {
            user_id: None,
            email: Some("andrii@gmail.com".to_string()),
            first_name: Some("Andrii".to_string()),
            last_name: Some("Muts".to_string()),
            birth_date: NaiveDate::from_ymd_opt(1998, 9, 9),
            address: Some("Lviv".to_string()),
            phone_number: Some("+380977020222".to_string()),
        }
    }

    fn messages_for<'a>(violations: &'a [FieldViolation], field: &str) -> Vec<&'a str> {
        violations
            .iter()
            .filter(|v| v.field_name == field)
            .map(|v| v.message.as_str())
            .collect()
    }

    #[test]
    fn test_valid_user_has_no_violations() {
        let violations = UserValidator::new().validate_at(&valid_user(), today());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_optional_fields_are_unconstrained() {
        let user = User {
            address: None,
            phone_number: None,
            ..valid_user()
        };

        assert!(UserValidator::new().validate_at(&user, today()).is_empty());
    }

    #[test]
    fn test_missing_email() {
        let user = User {
            email: None,
            ..valid_user()
        };

        let violations = UserValidator::new().validate_at(&user, today());
        assert_eq!(messages_for(&violations, "email"), vec![EMAIL_IS_REQUIRED]);
    }

    #[test]
    fn test_blank_email_reports_required_not_format() {
        let user = User {
            email: Some("   ".to_string()),
            ..valid_user()
        };

        let violations = UserValidator::new().validate_at(&user, today());
        assert_eq!(messages_for(&violations, "email"), vec![EMAIL_IS_REQUIRED]);
    }

    #[test]
    fn test_malformed_email() {
        for email in ["andrii", "a@", "@b.com", "a b@c.com"] {
            let user = User {
                email: Some(email.to_string()),
                ..valid_user()
            };

            let violations = UserValidator::new().validate_at(&user, today());
            assert_eq!(
                messages_for(&violations, "email"),
                vec![INVALID_EMAIL_FORMAT],
                "expected format violation for {email:?}"
            );
        }
    }

    #[test]
    fn test_blank_names() {
        let user = User {
            first_name: Some(String::new()),
            last_name: Some("  ".to_string()),
            ..valid_user()
        };

        let violations = UserValidator::new().validate_at(&user, today());
        assert_eq!(
            messages_for(&violations, "firstName"),
            vec![FIRST_NAME_IS_REQUIRED]
        );
        assert_eq!(
            messages_for(&violations, "lastName"),
            vec![LAST_NAME_IS_REQUIRED]
        );
    }

    #[test]
    fn test_missing_birth_date() {
        let user = User {
            birth_date: None,
            ..valid_user()
        };

        let violations = UserValidator::new().validate_at(&user, today());
        assert_eq!(
            messages_for(&violations, "birthDate"),
            vec![BIRTH_DATE_IS_REQUIRED]
        );
    }

    #[test]
    fn test_future_birth_date() {
        let user = User {
            birth_date: today().checked_add_days(Days::new(10)),
            ..valid_user()
        };

        let violations = UserValidator::new().validate_at(&user, today());
        assert_eq!(
            messages_for(&violations, "birthDate"),
            vec![BIRTH_DATE_NOT_IN_PAST]
        );
    }

    #[test]
    fn test_birth_date_today_is_not_in_past() {
        let user = User {
            birth_date: Some(today()),
            ..valid_user()
        };

        let violations = UserValidator::new().validate_at(&user, today());
        assert_eq!(
            messages_for(&violations, "birthDate"),
            vec![BIRTH_DATE_NOT_IN_PAST]
        );
    }

    #[test]
    fn test_all_violations_collected_in_one_pass() {
        let user = User {
            user_id: Some(UserId::new(1)),
            email: Some("not-an-email".to_string()),
            first_name: None,
            last_name: None,
            birth_date: None,
            address: None,
            phone_number: None,
        };

        let violations = UserValidator::new().validate_at(&user, today());
        assert_eq!(violations.len(), 4);
        assert_eq!(
            messages_for(&violations, "email"),
            vec![INVALID_EMAIL_FORMAT]
        );
        assert_eq!(
            messages_for(&violations, "birthDate"),
            vec![BIRTH_DATE_IS_REQUIRED]
        );
    }

    #[test]
    fn test_field_violation_display() {
        let violation = FieldViolation::new("email", EMAIL_IS_REQUIRED);
        assert_eq!(violation.to_string(), "email: Email is required.");

        let whole_payload = FieldViolation::new("", "No data is submitted.");
        assert_eq!(whole_payload.to_string(), "No data is submitted.");
    }

    #[test]
    fn test_field_violation_serialization() {
        let violation = FieldViolation::new("birthDate", BIRTH_DATE_IS_REQUIRED);
        let json = serde_json::to_value(&violation).unwrap();

        assert_eq!(json["fieldName"], "birthDate");
        assert_eq!(json["message"], "Birth date is required.");
    }
}

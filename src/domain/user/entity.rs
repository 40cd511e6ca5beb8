//! User entity and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// User identifier - assigned by the persistence gateway on first save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User record.
///
/// Every field is optional: the same shape carries full records, partial
/// patch payloads, and the wholly-absent payload the service rejects.
/// Constraints (required fields, email syntax, past birth date) are enforced
/// by the validation pass, not at construction. A record returned from the
/// persistence gateway always carries `user_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub user_id: Option<UserId>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl User {
    /// True when the identifier and every other field are absent.
    ///
    /// Empty strings are present values here; a payload with `email: ""`
    /// is not empty.
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.birth_date.is_none()
            && self.address.is_none()
            && self.phone_number.is_none()
    }

    /// Record with the identifier replaced
    pub fn with_id(mut self, id: UserId) -> Self {
        self.user_id = Some(id);
        self
    }
}

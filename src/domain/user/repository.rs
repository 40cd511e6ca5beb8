//! User repository trait

use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Debug;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Persistence gateway for user records
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by identifier; absence is a valid result
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Persist a record. Assigns an identifier when the record carries none,
    /// otherwise stores under the existing identifier. Returns the record as
    /// stored, identifier included.
    async fn save(&self, user: User) -> Result<User, DomainError>;

    /// Remove a record; returns whether anything existed to remove
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// Users with birth dates in the inclusive range, ordered by birth date
    async fn find_by_birth_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<User>, DomainError>;

    /// Check whether a record exists
    async fn exists(&self, id: UserId) -> Result<bool, DomainError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

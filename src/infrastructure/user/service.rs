//! User service - CRUD operations and business rules for user records

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};

use crate::domain::user::{User, UserId, UserRepository, UserValidator};
use crate::domain::DomainError;

/// User service.
///
/// Orchestrates the six operations over the persistence gateway and enforces
/// the business rules: non-empty payload, field-level validation, minimum
/// age on create, path/payload key consistency, and the patch
/// merge-and-revalidate flow. Every precondition is checked before the
/// gateway is touched, so a failed request never partially applies.
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    validator: UserValidator,
    min_age: u32,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, validator: UserValidator, min_age: u32) -> Self {
        Self {
            repository,
            validator,
            min_age,
        }
    }

    /// Get a user by identifier; absence is a valid result, not an error
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.find_by_id(id).await
    }

    /// Create a new user.
    ///
    /// The minimum-age comparison is strictly greater-than: a user turning
    /// exactly `min_age` today is rejected.
    pub async fn create(&self, user: User) -> Result<User, DomainError> {
        self.ensure_not_empty(&user)?;
        self.ensure_valid(&user)?;

        if let Some(birth_date) = user.birth_date {
            self.ensure_above_minimum_age(birth_date)?;
        }

        self.repository.save(user).await
    }

    /// Replace the stored record entirely
    pub async fn update(&self, id: UserId, user: User) -> Result<User, DomainError> {
        self.ensure_not_empty(&user)?;
        self.ensure_key_matches(id, &user)?;
        self.ensure_exists(id).await?;
        self.ensure_valid(&user)?;

        self.repository.save(user).await
    }

    /// Merge the provided fields into the stored record and revalidate.
    ///
    /// A field overwrites the stored value only when it is present and, for
    /// strings, non-empty: an empty string means "not provided", so a string
    /// field cannot be cleared through patch. The identifier is never
    /// changed.
    pub async fn patch(&self, id: UserId, user: User) -> Result<User, DomainError> {
        self.ensure_not_empty(&user)?;
        self.ensure_key_matches(id, &user)?;

        let mut merged = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)?;

        merge_for_patch(&mut merged, &user);
        self.ensure_valid(&merged)?;

        self.repository.save(merged).await
    }

    /// Remove a record; returns whether anything existed to remove
    pub async fn delete_by_id(&self, id: UserId) -> Result<bool, DomainError> {
        self.repository.delete(id).await
    }

    /// Users with birth dates in the inclusive range.
    ///
    /// The start bound must be strictly before the end bound.
    pub async fn find_by_birth_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<User>, DomainError> {
        if start >= end {
            return Err(DomainError::StartDateNotBeforeEndDate);
        }

        self.repository.find_by_birth_date_between(start, end).await
    }

    fn ensure_not_empty(&self, user: &User) -> Result<(), DomainError> {
        if user.is_empty() {
            return Err(DomainError::EmptyPayload);
        }
        Ok(())
    }

    fn ensure_key_matches(&self, id: UserId, user: &User) -> Result<(), DomainError> {
        if user.user_id != Some(id) {
            return Err(DomainError::KeyFieldMismatch);
        }
        Ok(())
    }

    async fn ensure_exists(&self, id: UserId) -> Result<(), DomainError> {
        if self.repository.exists(id).await? {
            Ok(())
        } else {
            Err(DomainError::NotFound)
        }
    }

    fn ensure_valid(&self, user: &User) -> Result<(), DomainError> {
        let violations = self.validator.validate(user);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(violations))
        }
    }

    fn ensure_above_minimum_age(&self, birth_date: NaiveDate) -> Result<(), DomainError> {
        let age = age_in_years(birth_date, Utc::now().date_naive());
        if age > self.min_age as i32 {
            Ok(())
        } else {
            Err(DomainError::below_minimum_age(self.min_age))
        }
    }
}

/// Whole elapsed years between `birth_date` and `today`
fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

fn merge_for_patch(target: &mut User, incoming: &User) {
    merge_string(&mut target.email, &incoming.email);
    merge_string(&mut target.first_name, &incoming.first_name);
    merge_string(&mut target.last_name, &incoming.last_name);
    merge_string(&mut target.address, &incoming.address);
    merge_string(&mut target.phone_number, &incoming.phone_number);

    if let Some(birth_date) = incoming.birth_date {
        target.birth_date = Some(birth_date);
    }
}

fn merge_string(target: &mut Option<String>, incoming: &Option<String>) {
    if let Some(value) = incoming {
        if !value.is_empty() {
            *target = Some(value.clone());
        }
    }
}

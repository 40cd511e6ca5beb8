//! Application state for shared services

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::user::UserService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
}

impl AppState {
    /// Create new application state with the provided service
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self { user_service }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;
    async fn create(&self, user: User) -> Result<User, DomainError>;
    async fn update(&self, id: UserId, user: User) -> Result<User, DomainError>;
    async fn patch(&self, id: UserId, user: User) -> Result<User, DomainError>;
    async fn delete_by_id(&self, id: UserId) -> Result<bool, DomainError>;
    async fn find_by_birth_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<User>, DomainError>;
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> UserServiceTrait for UserService<R> {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        UserService::find_by_id(self, id).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        UserService::create(self, user).await
    }

    async fn update(&self, id: UserId, user: User) -> Result<User, DomainError> {
        UserService::update(self, id, user).await
    }

    async fn patch(&self, id: UserId, user: User) -> Result<User, DomainError> {
        UserService::patch(self, id, user).await
    }

    async fn delete_by_id(&self, id: UserId) -> Result<bool, DomainError> {
        UserService::delete_by_id(self, id).await
    }

    async fn find_by_birth_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<User>, DomainError> {
        UserService::find_by_birth_date_between(self, start, end).await
    }
}

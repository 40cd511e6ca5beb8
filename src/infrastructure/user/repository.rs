//! In-memory user repository implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository.
///
/// Default storage backend; also the fake the service tests run against.
/// Identifiers come from a monotonically increasing sequence, mirroring the
/// identity column of the PostgreSQL backend.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    /// Create a repository seeded with records that already carry identifiers
    pub fn with_users(users: Vec<User>) -> Self {
        let mut map = HashMap::new();
        let mut max_id = 0;

        for user in users {
            if let Some(id) = user.user_id {
                max_id = max_id.max(id.as_i64());
                map.insert(id.as_i64(), user);
            }
        }

        Self {
            users: Arc::new(RwLock::new(map)),
            next_id: AtomicI64::new(max_id + 1),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id.as_i64()).cloned())
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        let id = match user.user_id {
            Some(id) => id,
            None => UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
        };

        let stored = user.with_id(id);
        users.insert(id.as_i64(), stored.clone());

        Ok(stored)
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id.as_i64()).is_some())
    }

    async fn find_by_birth_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;

        let mut matches: Vec<User> = users
            .values()
            .filter(|u| {
                u.birth_date
                    .map(|d| d >= start && d <= end)
                    .unwrap_or(false)
            })
            .cloned()
            .collect();

        matches.sort_by_key(|u| (u.birth_date, u.user_id));

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_born(year: i32, month: u32, day: u32) -> User {
        User {
            email: Some(format!("user{year}@example.com")),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            birth_date: NaiveDate::from_ymd_opt(year, month, day),
            ..User::default()
        }
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.save(user_born(1990, 1, 1)).await.unwrap();
        let second = repo.save(user_born(1991, 1, 1)).await.unwrap();

        assert_eq!(first.user_id, Some(UserId::new(1)));
        assert_eq!(second.user_id, Some(UserId::new(2)));
    }

    #[tokio::test]
    async fn test_save_with_id_overwrites() {
        let repo = InMemoryUserRepository::new();

        let stored = repo.save(user_born(1990, 1, 1)).await.unwrap();
        let id = stored.user_id.unwrap();

        let mut updated = stored.clone();
        updated.first_name = Some("Updated".to_string());
        repo.save(updated).await.unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.first_name.as_deref(), Some("Updated"));
        assert_eq!(found.user_id, Some(id));
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.find_by_id(UserId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryUserRepository::new();

        let stored = repo.save(user_born(1990, 1, 1)).await.unwrap();
        let id = stored.user_id.unwrap();

        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_exists() {
        let repo = InMemoryUserRepository::new();

        let stored = repo.save(user_born(1990, 1, 1)).await.unwrap();

        assert!(repo.exists(stored.user_id.unwrap()).await.unwrap());
        assert!(!repo.exists(UserId::new(42)).await.unwrap());
    }

    #[tokio::test]
    async fn test_birth_date_range_is_inclusive_and_ordered() {
        let repo = InMemoryUserRepository::new();

        repo.save(user_born(2003, 6, 1)).await.unwrap();
        repo.save(user_born(2000, 1, 1)).await.unwrap();
        repo.save(user_born(2005, 12, 31)).await.unwrap();
        repo.save(user_born(1999, 12, 31)).await.unwrap();

        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2005, 12, 31).unwrap();

        let matches = repo.find_by_birth_date_between(start, end).await.unwrap();

        let dates: Vec<NaiveDate> = matches.iter().filter_map(|u| u.birth_date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2003, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2005, 12, 31).unwrap(),
            ]
        );
    }

    #[tokio::test]
    async fn test_birth_date_range_can_be_empty() {
        let repo = InMemoryUserRepository::new();

        repo.save(user_born(1990, 1, 1)).await.unwrap();

        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();

        assert!(repo
            .find_by_birth_date_between(start, end)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_with_users_resumes_sequence_after_seed() {
        let seeded = user_born(1990, 1, 1).with_id(UserId::new(5));
        let repo = InMemoryUserRepository::with_users(vec![seeded]);

        let stored = repo.save(user_born(1991, 1, 1)).await.unwrap();
        assert_eq!(stored.user_id, Some(UserId::new(6)));
    }
}

//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the users table if it does not exist yet
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                email TEXT,
                first_name TEXT,
                last_name TEXT,
                birth_date DATE,
                address TEXT,
                phone_number TEXT
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, email, first_name, last_name, birth_date, address, phone_number
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        Ok(row.map(|row| row_to_user(&row)))
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        let row = match user.user_id {
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO users (email, first_name, last_name, birth_date, address, phone_number)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    RETURNING user_id, email, first_name, last_name, birth_date, address, phone_number
                    "#,
                )
                .bind(&user.email)
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(user.birth_date)
                .bind(&user.address)
                .bind(&user.phone_number)
                .fetch_one(&self.pool)
                .await
            }
            Some(id) => {
                sqlx::query(
                    r#"
                    INSERT INTO users (user_id, email, first_name, last_name, birth_date, address, phone_number)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    ON CONFLICT (user_id) DO UPDATE SET
                        email = EXCLUDED.email,
                        first_name = EXCLUDED.first_name,
                        last_name = EXCLUDED.last_name,
                        birth_date = EXCLUDED.birth_date,
                        address = EXCLUDED.address,
                        phone_number = EXCLUDED.phone_number
                    RETURNING user_id, email, first_name, last_name, birth_date, address, phone_number
                    "#,
                )
                .bind(id.as_i64())
                .bind(&user.email)
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(user.birth_date)
                .bind(&user.address)
                .bind(&user.phone_number)
                .fetch_one(&self.pool)
                .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to save user: {}", e)))?;

        Ok(row_to_user(&row))
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_birth_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, email, first_name, last_name, birth_date, address, phone_number
            FROM users
            WHERE birth_date BETWEEN $1 AND $2
            ORDER BY birth_date, user_id
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to query birth date range: {}", e)))?;

        Ok(rows.iter().map(row_to_user).collect())
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> User {
    let user_id: i64 = row.get("user_id");

    User {
        user_id: Some(UserId::new(user_id)),
        email: row.get("email"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        birth_date: row.get("birth_date"),
        address: row.get("address"),
        phone_number: row.get("phone_number"),
    }
}

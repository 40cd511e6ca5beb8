//! User Registry API
//!
//! A CRUD REST service for user records with:
//! - Field-level validation collecting every violation per pass
//! - Minimum-age gating on create (configurable threshold)
//! - Partial updates that merge provided fields and revalidate
//! - In-memory or PostgreSQL persistence behind one repository trait

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::StorageBackend;
use domain::user::UserValidator;
use infrastructure::user::{InMemoryUserRepository, PostgresUserRepository, UserService};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let validator = UserValidator::new();
    let min_age = config.user.min_age;

    info!("Storage backend: {:?}", config.storage.backend);

    let user_service: Arc<dyn api::state::UserServiceTrait> = match config.storage.backend {
        StorageBackend::Postgres => {
            let database_url = std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

            info!("Connecting to PostgreSQL...");
            let pg_pool = sqlx::PgPool::connect(&database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            PostgresUserRepository::ensure_schema(&pg_pool)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to prepare schema: {}", e))?;

            let repository = Arc::new(PostgresUserRepository::new(pg_pool));
            Arc::new(UserService::new(repository, validator, min_age))
        }
        StorageBackend::Memory => {
            let repository = Arc::new(InMemoryUserRepository::new());
            Arc::new(UserService::new(repository, validator, min_age))
        }
    };

    Ok(AppState::new(user_service))
}

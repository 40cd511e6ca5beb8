//! User infrastructure module
//!
//! Implementations of the persistence gateway (in-memory and PostgreSQL)
//! and the user service that orchestrates CRUD operations over it.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::UserService;

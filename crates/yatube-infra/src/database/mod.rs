//! Database connection management and repositories.

mod connections;
pub mod memory;

#[cfg(feature = "postgres")]
pub mod entity;

#[cfg(feature = "postgres")]
mod postgres_repo;

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;

#[cfg(feature = "postgres")]
pub use postgres_repo::{PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository};

//! Database connection management and repositories.

mod associations;
mod connections;
mod postgres_base;
pub mod postgres_repo;

pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use postgres_base::PostgresBaseRepository;
pub use postgres_repo::{PostgresPostRepository, PostgresTagRepository, PostgresUserRepository};

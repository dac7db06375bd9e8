//! # Blogly Infrastructure
//!
//! Concrete implementations of the ports defined in `blogly-core`,
//! backed by a relational store through SeaORM.

pub mod database;

pub use database::{
    DatabaseConfig, DatabaseConnections, PostgresPostRepository, PostgresTagRepository,
    PostgresUserRepository,
};

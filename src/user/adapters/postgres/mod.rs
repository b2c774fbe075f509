//! `PostgreSQL` adapter for user storage.

mod models;
mod repository;

pub use repository::PostgresUserRepository;

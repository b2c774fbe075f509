//! `PostgreSQL` adapter for task storage.

mod models;
mod repository;

pub use repository::PostgresTaskRepository;

//! `PostgreSQL` adapter for board storage.

mod models;
mod repository;

pub use repository::PostgresBoardRepository;

//! Port contracts for user storage.

pub mod repository;

pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};

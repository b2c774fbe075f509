//! Error types for user validation and session checks.

use thiserror::Error;

/// Errors returned while constructing user values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyUserName,

    /// The email address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),
}

/// Returned when a protected operation runs without an authenticated user.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("unauthorized: session missing")]
pub struct Unauthorized;

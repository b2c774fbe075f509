//! Error types for board validation and parsing.

use thiserror::Error;

/// Errors returned while constructing board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The board name is empty after trimming.
    #[error("board name is required")]
    EmptyBoardName,

    /// The board name exceeds the maximum length.
    #[error("board name must be less than {max} characters, got {actual}")]
    BoardNameTooLong {
        /// Maximum accepted length.
        max: usize,
        /// Length of the rejected value.
        actual: usize,
    },

    /// The board description exceeds the maximum length.
    #[error("description must be less than {max} characters, got {actual}")]
    DescriptionTooLong {
        /// Maximum accepted length.
        max: usize,
        /// Length of the rejected value.
        actual: usize,
    },
}

/// Error returned while parsing column keys from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown column key: {0}")]
pub struct ParseColumnKeyError(pub String);

//! Error types for task validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("title is required")]
    EmptyTitle,

    /// The description is shorter than the minimum length.
    #[error("description must be at least {min} characters")]
    DescriptionTooShort {
        /// Minimum accepted length.
        min: usize,
    },

    /// The comment body is empty after trimming.
    #[error("comment content must not be empty")]
    EmptyComment,

    /// The attachment is missing a name or URL.
    #[error("attachment {0} must not be empty")]
    EmptyAttachmentField(&'static str),

    /// The order value is negative.
    #[error("order must not be negative, got {0}")]
    NegativeOrder(i32),
}

/// Error returned while parsing priority codes strictly.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

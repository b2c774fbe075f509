//! User-facing messages raised by dashboard flows.

use serde::Serialize;
use std::fmt;

/// Tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// The action went through.
    Success,
    /// The action failed.
    Error,
}

/// A short message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Tone.
    pub level: NoticeLevel,
    /// Text shown to the user.
    pub message: String,
}

impl Notice {
    /// Creates a success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Creates an error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// A drop was persisted.
    #[must_use]
    pub fn task_moved() -> Self {
        Self::success("Task moved successfully")
    }

    /// A drop failed and was reverted.
    #[must_use]
    pub fn move_reverted() -> Self {
        Self::error("Failed to move task. Changes have been reverted.")
    }

    /// The backend refused an anonymous session.
    #[must_use]
    pub fn sign_in_required() -> Self {
        Self::error("You must be signed in")
    }

    /// Returns whether this is an error notice.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

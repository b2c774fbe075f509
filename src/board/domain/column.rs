//! Column keys and concrete board columns.

use super::{BoardId, ColumnId, ParseColumnKeyError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic lane of a board. Doubles as the task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKey {
    /// Work not yet started.
    Todo,
    /// Work underway.
    InProgress,
    /// Finished work.
    Done,
}

impl ColumnKey {
    /// Every lane in board order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Title given to the lane when a board is created.
    #[must_use]
    pub const fn default_title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Color given to the lane when a board is created.
    #[must_use]
    pub const fn default_color(self) -> &'static str {
        match self {
            Self::Todo => "#ef4444",
            Self::InProgress => "#f59e0b",
            Self::Done => "#10b981",
        }
    }
}

impl TryFrom<&str> for ColumnKey {
    type Error = ParseColumnKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" | "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseColumnKeyError(value.to_owned())),
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete column row belonging to one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumn {
    id: ColumnId,
    board_id: BoardId,
    key: ColumnKey,
    title: String,
    color: String,
    position: i32,
}

impl BoardColumn {
    /// Creates the default column for `key` on a new board.
    #[must_use]
    pub fn default_for(board_id: BoardId, key: ColumnKey, position: i32) -> Self {
        Self {
            id: ColumnId::new(),
            board_id,
            key,
            title: key.default_title().to_owned(),
            color: key.default_color().to_owned(),
            position,
        }
    }

    /// Reconstructs a column from persisted fields.
    #[must_use]
    pub const fn from_persisted(
        id: ColumnId,
        board_id: BoardId,
        key: ColumnKey,
        title: String,
        color: String,
        position: i32,
    ) -> Self {
        Self {
            id,
            board_id,
            key,
            title,
            color,
            position,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the owning board.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the semantic lane key.
    #[must_use]
    pub const fn key(&self) -> ColumnKey {
        self.key
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the display color.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the column's order index on the board.
    #[must_use]
    pub const fn position(&self) -> i32 {
        self.position
    }
}

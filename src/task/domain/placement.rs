//! Where a task sits on its board.

use super::{TaskId, TaskStatus};
use crate::board::domain::ColumnId;
use serde::{Deserialize, Serialize};

/// Status, column and position of one task.
///
/// Status and column always describe the same lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Semantic lane.
    pub status: TaskStatus,
    /// Concrete column row of the lane.
    pub column_id: ColumnId,
    /// Position within the column.
    pub order: i32,
}

/// A placement destined for a specific task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMove {
    /// Task being placed.
    pub task_id: TaskId,
    /// New placement.
    pub placement: Placement,
}

impl TaskMove {
    /// Creates a move of `task_id` to `placement`.
    #[must_use]
    pub const fn new(task_id: TaskId, placement: Placement) -> Self {
        Self { task_id, placement }
    }
}

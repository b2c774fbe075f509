//! Maps lanes to board columns and raw element ids to drop targets.

use crate::board::domain::{Board, BoardColumn, ColumnKey};
use crate::task::domain::{Placement, Task, TaskId, TaskStatus};
use uuid::Uuid;

/// What a dragged task was released over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// A column, identified by its lane.
    Column(ColumnKey),
    /// Another task card.
    Task(TaskId),
}

/// Resolves identifiers against one board and its loaded tasks.
#[derive(Debug, Clone, Copy)]
pub struct ColumnResolver<'a> {
    board: &'a Board,
    tasks: &'a [Task],
}

impl<'a> ColumnResolver<'a> {
    /// Creates a resolver over a board and its tasks.
    #[must_use]
    pub const fn new(board: &'a Board, tasks: &'a [Task]) -> Self {
        Self { board, tasks }
    }

    /// Returns the board's column for a lane.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Option<&'a BoardColumn> {
        self.board.column_for(status)
    }

    /// Builds a placement in the lane's column.
    #[must_use]
    pub fn placement(&self, status: TaskStatus, order: i32) -> Option<Placement> {
        self.column(status).map(|column| Placement {
            status,
            column_id: column.id(),
            order,
        })
    }

    /// Resolves a raw droppable identifier.
    ///
    /// Lane keys and column ids resolve to columns; task ids resolve to
    /// tasks of this board. Anything else is not a target.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> Option<DropTarget> {
        if let Ok(key) = ColumnKey::try_from(raw) {
            return self.column(key).map(|column| DropTarget::Column(column.key()));
        }
        let uuid = Uuid::parse_str(raw.trim()).ok()?;
        if let Some(column) = self
            .board
            .columns()
            .iter()
            .find(|column| column.id().into_inner() == uuid)
        {
            return Some(DropTarget::Column(column.key()));
        }
        let id = TaskId::from_uuid(uuid);
        self.tasks
            .iter()
            .any(|task| task.id() == id)
            .then_some(DropTarget::Task(id))
    }
}

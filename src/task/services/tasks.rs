//! Task creation, editing, placement and comments.

use crate::board::{
    domain::{Board, BoardColumn, BoardId, ColumnId},
    ports::{BoardRepository, BoardRepositoryError},
};
use crate::task::{
    domain::{
        Attachment, AttachmentDraft, Comment, Placement, Task, TaskDomainError, TaskDraft, TaskId,
        TaskMove, TaskStatus, TaskUpdate,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::domain::{Session, Unauthorized, UserId};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The session has no signed-in user.
    #[error(transparent)]
    Unauthorized(#[from] Unauthorized),
    /// The board does not exist or is not visible to the caller.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),
    /// The task does not exist or is not visible to the caller.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The column is not part of the task's board.
    #[error("column {column} does not belong to board {board}")]
    ColumnNotInBoard {
        /// Requested column.
        column: ColumnId,
        /// Board of the task.
        board: BoardId,
    },
    /// The board has no column for the requested lane.
    #[error("board {board} has no {status} column")]
    MissingLane {
        /// Board of the task.
        board: BoardId,
        /// Requested lane.
        status: TaskStatus,
    },
    /// The requested status and column describe different lanes.
    #[error("status {status} does not match column {column}")]
    StatusColumnMismatch {
        /// Requested status.
        status: TaskStatus,
        /// Requested column.
        column: ColumnId,
    },
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Board repository operation failed.
    #[error(transparent)]
    Board(#[from] BoardRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Every operation checks that the session user can access the board the
/// task lives on; inaccessible tasks are reported as missing.
#[derive(Clone)]
pub struct TaskService<T, B, C>
where
    T: TaskRepository,
    B: BoardRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    boards: Arc<B>,
    clock: Arc<C>,
}

impl<T, B, C> TaskService<T, B, C>
where
    T: TaskRepository,
    B: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, boards: Arc<B>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            boards,
            clock,
        }
    }

    /// Creates a task at the end of its column.
    ///
    /// The column defaults to the board's first; a status alone selects that
    /// lane's column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the board is inaccessible, the
    /// requested lane is inconsistent or the draft is invalid.
    pub async fn create_task(
        &self,
        session: &Session,
        board_id: BoardId,
        draft: TaskDraft,
    ) -> TaskServiceResult<Task> {
        let user = session.require_user()?;
        let board = self.accessible_board(user, board_id).await?;
        let column = resolve_column(&board, draft.status, draft.column_id)?;
        let existing = self.tasks.list_for_board(board_id).await?;
        let order = existing
            .iter()
            .filter(|task| task.status() == column.key())
            .count();
        let placement = Placement {
            status: column.key(),
            column_id: column.id(),
            order: i32::try_from(order).unwrap_or(i32::MAX),
        };
        let task = Task::new(board_id, draft, placement, &*self.clock)?;
        self.tasks.store(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            board_id = %board_id,
            status = %task.status(),
            "created task"
        );
        Ok(task)
    }

    /// Lists a board's tasks in board order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::BoardNotFound`] when the board is missing
    /// or inaccessible.
    pub async fn list_tasks(
        &self,
        session: &Session,
        board_id: BoardId,
    ) -> TaskServiceResult<Vec<Task>> {
        let user = session.require_user()?;
        self.accessible_board(user, board_id).await?;
        Ok(self.tasks.list_for_board(board_id).await?)
    }

    /// Returns one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is missing or its
    /// board is inaccessible.
    pub async fn get_task(&self, session: &Session, id: TaskId) -> TaskServiceResult<Task> {
        let user = session.require_user()?;
        let (task, _) = self.accessible_task(user, id).await?;
        Ok(task)
    }

    /// Applies a partial update and returns the stored task.
    ///
    /// A status without a column re-derives the column from the board.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the task is inaccessible, the lane is
    /// inconsistent or a field is invalid.
    pub async fn update_task(
        &self,
        session: &Session,
        id: TaskId,
        update: TaskUpdate,
    ) -> TaskServiceResult<Task> {
        let user = session.require_user()?;
        let (mut task, board) = self.accessible_task(user, id).await?;
        if update.touches_placement() {
            let placement = resolve_update_placement(&board, &task, &update)?;
            task.place(placement);
        }
        task.apply_update(&update, &*self.clock)?;
        self.tasks.update(&task).await?;
        tracing::debug!(task_id = %id, status = %task.status(), order = task.order(), "updated task");
        Ok(task)
    }

    /// Applies a batch of placements atomically and returns the moved tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when any task is inaccessible or any
    /// placement names a column of another lane or board. Nothing is stored
    /// in that case.
    pub async fn apply_moves(
        &self,
        session: &Session,
        moves: Vec<TaskMove>,
    ) -> TaskServiceResult<Vec<Task>> {
        let user = session.require_user()?;
        let mut moved = Vec::with_capacity(moves.len());
        for mv in &moves {
            let (mut task, board) = self.accessible_task(user, mv.task_id).await?;
            let placement = mv.placement;
            if placement.order < 0 {
                return Err(TaskDomainError::NegativeOrder(placement.order).into());
            }
            let column = resolve_column(&board, Some(placement.status), Some(placement.column_id))?;
            task.place(Placement {
                status: column.key(),
                column_id: column.id(),
                order: placement.order,
            });
            moved.push(task);
        }
        if moves.is_empty() {
            return Ok(moved);
        }
        let updated_at = self.clock.utc();
        self.tasks.apply_moves(&moves, updated_at).await?;
        for task in &mut moved {
            task.set_updated_at(updated_at);
        }
        tracing::info!(count = moves.len(), "applied task moves");
        Ok(moved)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is missing or
    /// inaccessible.
    pub async fn delete_task(&self, session: &Session, id: TaskId) -> TaskServiceResult<()> {
        let user = session.require_user()?;
        self.accessible_task(user, id).await?;
        self.tasks.delete(id).await?;
        tracing::info!(task_id = %id, "deleted task");
        Ok(())
    }

    /// Adds a comment authored by the session user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the task is inaccessible or the
    /// content is blank.
    pub async fn add_comment(
        &self,
        session: &Session,
        id: TaskId,
        content: &str,
    ) -> TaskServiceResult<Comment> {
        let user = session.require_user()?;
        self.accessible_task(user, id).await?;
        let comment = Comment::new(id, user, content, &*self.clock)?;
        self.tasks.add_comment(&comment).await?;
        tracing::debug!(task_id = %id, comment_id = %comment.id(), "added comment");
        Ok(comment)
    }

    /// Attaches an uploaded file to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the task is inaccessible or the
    /// metadata is incomplete.
    pub async fn add_attachment(
        &self,
        session: &Session,
        id: TaskId,
        draft: AttachmentDraft,
    ) -> TaskServiceResult<Attachment> {
        let user = session.require_user()?;
        self.accessible_task(user, id).await?;
        let attachment = Attachment::new(id, draft, &*self.clock)?;
        self.tasks.add_attachment(&attachment).await?;
        Ok(attachment)
    }

    async fn accessible_board(&self, user: UserId, id: BoardId) -> TaskServiceResult<Board> {
        self.boards
            .find_by_id(id)
            .await?
            .filter(|board| board.is_accessible_by(user))
            .ok_or(TaskServiceError::BoardNotFound(id))
    }

    async fn accessible_task(&self, user: UserId, id: TaskId) -> TaskServiceResult<(Task, Board)> {
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        let board = self
            .boards
            .find_by_id(task.board_id())
            .await?
            .filter(|board| board.is_accessible_by(user))
            .ok_or(TaskServiceError::NotFound(id))?;
        Ok((task, board))
    }
}

/// Picks the board column for an optional status and column pair.
fn resolve_column(
    board: &Board,
    status: Option<TaskStatus>,
    column_id: Option<ColumnId>,
) -> TaskServiceResult<BoardColumn> {
    let column = match (status, column_id) {
        (_, Some(column_id)) => board
            .column_by_id(column_id)
            .ok_or(TaskServiceError::ColumnNotInBoard {
                column: column_id,
                board: board.id(),
            })?,
        (Some(status), None) => board.column_for(status).ok_or(TaskServiceError::MissingLane {
            board: board.id(),
            status,
        })?,
        (None, None) => board.first_column().ok_or(TaskServiceError::MissingLane {
            board: board.id(),
            status: TaskStatus::Todo,
        })?,
    };
    if let Some(status) = status.filter(|status| *status != column.key()) {
        return Err(TaskServiceError::StatusColumnMismatch {
            status,
            column: column.id(),
        });
    }
    Ok(column.clone())
}

fn resolve_update_placement(
    board: &Board,
    task: &Task,
    update: &TaskUpdate,
) -> TaskServiceResult<Placement> {
    let order = update.order.unwrap_or_else(|| task.order());
    if order < 0 {
        return Err(TaskDomainError::NegativeOrder(order).into());
    }
    if update.status.is_none() && update.column_id.is_none() {
        return Ok(Placement { order, ..task.placement() });
    }
    let column = resolve_column(board, update.status, update.column_id)?;
    Ok(Placement {
        status: column.key(),
        column_id: column.id(),
        order,
    })
}

//! Backend port used by the dashboard to read and persist board state.

use crate::board::{
    domain::{Board, BoardId},
    ports::BoardRepositoryError,
    services::BoardServiceError,
};
use crate::task::{
    domain::{Comment, Task, TaskDraft, TaskId, TaskMove, TaskUpdate},
    ports::TaskRepositoryError,
    services::TaskServiceError,
};
use crate::user::{domain::User, services::UserDirectoryError};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gateway calls.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Board, task and user operations available to the dashboard.
///
/// Every call acts on behalf of the session the gateway was created for.
#[async_trait]
pub trait KanbanGateway: Send + Sync {
    /// Lists boards the session user owns or belongs to, with columns.
    async fn list_boards(&self) -> GatewayResult<Vec<Board>>;

    /// Lists every user.
    async fn list_users(&self) -> GatewayResult<Vec<User>>;

    /// Lists a board's tasks in board order with comments and attachments.
    async fn list_tasks(&self, board: BoardId) -> GatewayResult<Vec<Task>>;

    /// Applies a partial update and returns the stored task.
    async fn update_task(&self, task: TaskId, update: TaskUpdate) -> GatewayResult<Task>;

    /// Applies a batch of placements all-or-nothing.
    async fn apply_moves(&self, moves: Vec<TaskMove>) -> GatewayResult<Vec<Task>>;

    /// Creates a task on a board.
    async fn create_task(&self, board: BoardId, draft: TaskDraft) -> GatewayResult<Task>;

    /// Deletes a task.
    async fn delete_task(&self, task: TaskId) -> GatewayResult<()>;

    /// Adds a comment by the session user.
    async fn add_comment(&self, task: TaskId, content: String) -> GatewayResult<Comment>;

    /// Creates a board with the default columns.
    async fn create_board(&self, name: String, description: Option<String>)
    -> GatewayResult<Board>;
}

/// Errors surfaced by gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The request was rejected as invalid.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The addressed entity does not exist or is hidden from the caller.
    #[error("not found: {0}")]
    NotFound(String),

    /// No user is signed in.
    #[error("unauthorized")]
    Unauthorized,

    /// The backend could not be reached or failed internally.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Wraps a transport failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}

impl From<TaskRepositoryError> for GatewayError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(_) => Self::NotFound(err.to_string()),
            TaskRepositoryError::DuplicateTask(_) => Self::Validation(err.to_string()),
            TaskRepositoryError::Persistence(_) => Self::transport(err),
        }
    }
}

impl From<BoardRepositoryError> for GatewayError {
    fn from(err: BoardRepositoryError) -> Self {
        match err {
            BoardRepositoryError::NotFound(_) => Self::NotFound(err.to_string()),
            BoardRepositoryError::DuplicateBoard(_) => Self::Validation(err.to_string()),
            BoardRepositoryError::Persistence(_) => Self::transport(err),
        }
    }
}

impl From<TaskServiceError> for GatewayError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Unauthorized(_) => Self::Unauthorized,
            TaskServiceError::BoardNotFound(_) | TaskServiceError::NotFound(_) => {
                Self::NotFound(err.to_string())
            }
            TaskServiceError::ColumnNotInBoard { .. }
            | TaskServiceError::MissingLane { .. }
            | TaskServiceError::StatusColumnMismatch { .. }
            | TaskServiceError::Domain(_) => Self::Validation(err.to_string()),
            TaskServiceError::Repository(inner) => inner.into(),
            TaskServiceError::Board(inner) => inner.into(),
        }
    }
}

impl From<BoardServiceError> for GatewayError {
    fn from(err: BoardServiceError) -> Self {
        match err {
            BoardServiceError::Unauthorized(_) => Self::Unauthorized,
            BoardServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            BoardServiceError::NotOwner(_) | BoardServiceError::Domain(_) => {
                Self::Validation(err.to_string())
            }
            BoardServiceError::Repository(inner) => inner.into(),
        }
    }
}

impl From<UserDirectoryError> for GatewayError {
    fn from(err: UserDirectoryError) -> Self {
        match err {
            UserDirectoryError::Unauthorized(_) => Self::Unauthorized,
            UserDirectoryError::Domain(_) => Self::Validation(err.to_string()),
            UserDirectoryError::Repository(inner) => Self::transport(inner),
        }
    }
}

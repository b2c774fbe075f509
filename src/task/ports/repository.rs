//! Repository port for task persistence, comments and placement batches.

use crate::board::domain::BoardId;
use crate::task::domain::{Attachment, Comment, Task, TaskId, TaskMove};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists the scalar fields of an existing task.
    ///
    /// Comments and attachments are written through their own operations.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task with its comments and attachments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier, with comments and attachments.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Lists a board's tasks in board order.
    async fn list_for_board(&self, board: BoardId) -> TaskRepositoryResult<Vec<Task>>;

    /// Appends a comment to its task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn add_comment(&self, comment: &Comment) -> TaskRepositoryResult<()>;

    /// Appends an attachment to its task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn add_attachment(&self, attachment: &Attachment) -> TaskRepositoryResult<()>;

    /// Applies every placement or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] for the first missing task,
    /// leaving all stored tasks unchanged.
    async fn apply_moves(
        &self,
        moves: &[TaskMove],
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for TaskRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        // Constraint violations carry no identifiers, so every Diesel error
        // is reported as a persistence failure.
        Self::persistence(err)
    }
}

//! In-memory task repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::domain::BoardId;
use crate::task::{
    domain::{Attachment, Comment, Task, TaskId, TaskMove, sort_for_board},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Placement batches hold the write lock for their whole duration, so a
/// batch is observed either entirely or not at all.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        let stored = tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        let mut updated = task.clone();
        updated.adopt_children(stored);
        *stored = updated;
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.tasks.read().map_err(poisoned)?;
        Ok(tasks.get(&id).cloned())
    }

    async fn list_for_board(&self, board: BoardId) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(poisoned)?;
        let mut listed: Vec<Task> = tasks
            .values()
            .filter(|task| task.board_id() == board)
            .cloned()
            .collect();
        sort_for_board(&mut listed);
        Ok(listed)
    }

    async fn add_comment(&self, comment: &Comment) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        let task = tasks
            .get_mut(&comment.task_id())
            .ok_or(TaskRepositoryError::NotFound(comment.task_id()))?;
        task.push_comment(comment.clone());
        Ok(())
    }

    async fn add_attachment(&self, attachment: &Attachment) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        let task = tasks
            .get_mut(&attachment.task_id())
            .ok_or(TaskRepositoryError::NotFound(attachment.task_id()))?;
        task.push_attachment(attachment.clone());
        Ok(())
    }

    async fn apply_moves(
        &self,
        moves: &[TaskMove],
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        if let Some(missing) = moves.iter().find(|mv| !tasks.contains_key(&mv.task_id)) {
            return Err(TaskRepositoryError::NotFound(missing.task_id));
        }
        for mv in moves {
            if let Some(task) = tasks.get_mut(&mv.task_id) {
                task.place(mv.placement);
                task.set_updated_at(updated_at);
            }
        }
        Ok(())
    }
}

//! Wires the store, drag tracking, planning and persistence together.

use super::{BoardReadModel, MoveSynchronizer, PendingMove, SyncConfig, SyncOutcome};
use crate::board::domain::BoardId;
use crate::dashboard::{
    domain::{
        BoardAnalytics, ColumnResolver, DragTracker, DropTarget, Notice, ReorderEngine,
        StoreAction, TaskFilter, TaskStore, all_tags,
    },
    ports::{GatewayError, KanbanGateway, Notifier},
};
use crate::task::domain::{Task, TaskDraft, TaskId, TaskMove, TaskUpdate};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Event-driven dashboard state machine.
///
/// Every event takes `&mut self`. A drop is split into
/// [`DashboardController::begin_drop`], a push through
/// [`DashboardController::synchronizer`] and
/// [`DashboardController::settle`], so new drags may start while an earlier
/// move is still being persisted.
pub struct DashboardController<G, N>
where
    G: KanbanGateway,
    N: Notifier,
{
    gateway: Arc<G>,
    read_model: BoardReadModel<G>,
    sync: MoveSynchronizer<G>,
    notifier: Arc<N>,
    store: TaskStore,
    drag: DragTracker,
    filter: TaskFilter,
}

impl<G, N> DashboardController<G, N>
where
    G: KanbanGateway,
    N: Notifier,
{
    /// Creates a controller with an empty store.
    #[must_use]
    pub fn new(gateway: Arc<G>, notifier: Arc<N>, config: SyncConfig) -> Self {
        Self {
            read_model: BoardReadModel::new(Arc::clone(&gateway)),
            sync: MoveSynchronizer::new(Arc::clone(&gateway), config),
            gateway,
            notifier,
            store: TaskStore::new(),
            drag: DragTracker::new(),
            filter: TaskFilter::default(),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Returns the drag tracker.
    #[must_use]
    pub const fn drag(&self) -> &DragTracker {
        &self.drag
    }

    /// Returns the active filter.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Replaces the active filter.
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    /// Returns the active board's tasks that pass the filter.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.filter.apply(self.store.tasks())
    }

    /// Returns the tags used on the active board.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        all_tags(self.store.tasks())
    }

    /// Summarises the active board as of `now`.
    #[must_use]
    pub fn analytics(&self, now: DateTime<Utc>) -> BoardAnalytics {
        BoardAnalytics::compute(self.store.tasks(), now)
    }

    /// Returns a handle for persisting pending moves.
    #[must_use]
    pub fn synchronizer(&self) -> MoveSynchronizer<G> {
        self.sync.clone()
    }

    /// Loads boards and users, then the active board's tasks.
    ///
    /// Returns `false` and raises a notice when anything fails to load.
    pub async fn load(&mut self) -> bool {
        match self.read_model.directory().await {
            Ok((boards, users)) => {
                self.store.dispatch(StoreAction::LoadBoards(boards));
                self.store.dispatch(StoreAction::LoadUsers(users));
            }
            Err(error) => {
                self.report(&error, "Failed to load data");
                return false;
            }
        }
        self.reload_tasks(StoreAction::LoadTasks).await
    }

    /// Switches to another board and loads its tasks.
    pub async fn select_board(&mut self, board: BoardId) -> bool {
        self.store.dispatch(StoreAction::SelectBoard(board));
        self.reload_tasks(StoreAction::LoadTasks).await
    }

    /// Reloads the active board's tasks from the backend.
    ///
    /// Tasks still held by an in-flight move keep their optimistic
    /// placement until that move settles.
    pub async fn refresh_tasks(&mut self) -> bool {
        self.reload_tasks(StoreAction::MergeTasks).await
    }

    async fn reload_tasks(&mut self, action: fn(Vec<Task>) -> StoreAction) -> bool {
        let Some(board) = self.store.active_board_id() else {
            return true;
        };
        match self.read_model.tasks(board).await {
            Ok(tasks) => {
                self.store.dispatch(action(tasks));
                true
            }
            Err(error) => {
                self.report(&error, "Failed to load data");
                false
            }
        }
    }

    /// Picks up a task. Returns `false` when the task is not on the board.
    pub fn drag_start(&mut self, task: TaskId) -> bool {
        let Some(dragged) = self.store.task(task) else {
            return false;
        };
        self.drag.start(dragged);
        true
    }

    /// Records the element under the pointer and previews lane changes.
    ///
    /// Repeated events over the same target are ignored.
    pub fn drag_over(&mut self, raw_target: Option<&str>) {
        let Some(session) = self.drag.active().copied() else {
            return;
        };
        let target = raw_target.and_then(|raw| self.resolve(raw));
        if session.hover() == target {
            return;
        }
        self.drag.hover(target);
        let Some(DropTarget::Column(status)) = target else {
            return;
        };
        let preview = self.store.task(session.task_id()).and_then(|task| {
            if task.status() == status {
                return None;
            }
            let board = self.store.active_board()?;
            ColumnResolver::new(board, self.store.tasks()).placement(status, task.order())
        });
        if let Some(placement) = preview {
            self.store
                .dispatch(StoreAction::PreviewMove(TaskMove::new(session.task_id(), placement)));
        }
    }

    /// Releases the dragged task and applies the move optimistically.
    ///
    /// Returns the move to persist, or `None` when the drop changes nothing.
    #[must_use = "a pending move must be pushed and settled"]
    pub fn begin_drop(&mut self, raw_target: Option<&str>) -> Option<PendingMove> {
        let session = self.drag.finish()?;
        let target = raw_target.and_then(|raw| self.resolve(raw))?;
        let command = {
            let board = self.store.active_board()?;
            ReorderEngine::new(board, self.store.tasks()).plan(
                session.task_id(),
                Some(session.origin()),
                target,
            )?
        };
        let operation = self.store.next_operation();
        self.store.dispatch(StoreAction::ApplyPlacements {
            operation,
            placements: command.forward().to_vec(),
        });
        tracing::debug!(
            operation = %operation,
            task_id = %command.task_id(),
            kind = ?command.kind(),
            "applied move optimistically"
        );
        Some(PendingMove::new(operation, command))
    }

    /// Reconciles the store with the outcome of a pushed move.
    ///
    /// Returns whether the move was persisted.
    pub async fn settle(&mut self, pending: PendingMove, outcome: SyncOutcome) -> bool {
        let operation = pending.operation();
        match outcome {
            SyncOutcome::Persisted { replacement } => {
                if let Some(task) = replacement {
                    self.store.dispatch(StoreAction::ReplaceTask {
                        operation: Some(operation),
                        task,
                    });
                }
                self.store.dispatch(StoreAction::Complete(operation));
                self.notifier.notify(Notice::task_moved());
                true
            }
            SyncOutcome::Failed { error, succeeded } => {
                self.store.dispatch(StoreAction::Rollback {
                    operation,
                    placements: pending.command().inverse().to_vec(),
                });
                self.store.dispatch(StoreAction::Complete(operation));
                self.notifier.notify(match error {
                    GatewayError::Unauthorized => Notice::sign_in_required(),
                    _ => Notice::move_reverted(),
                });
                if succeeded > 0 && self.sync.config().refetch_after_partial_failure {
                    self.refresh_tasks().await;
                }
                false
            }
        }
    }

    /// Drops the dragged task and waits for persistence.
    ///
    /// Returns whether a move was persisted.
    pub async fn drop_task(&mut self, raw_target: Option<&str>) -> bool {
        let Some(pending) = self.begin_drop(raw_target) else {
            return false;
        };
        let outcome = self.sync.push(&pending).await;
        self.settle(pending, outcome).await
    }

    /// Creates a board, adds it to the store and makes it active.
    pub async fn create_board(&mut self, name: &str, description: Option<&str>) -> Option<BoardId> {
        let result = self
            .gateway
            .create_board(name.to_owned(), description.map(str::to_owned))
            .await;
        match result {
            Ok(board) => {
                let id = board.id();
                self.store.dispatch(StoreAction::InsertBoard(board));
                self.notifier
                    .notify(Notice::success("Board created successfully"));
                Some(id)
            }
            Err(error) => {
                self.report(&error, "Failed to create board");
                None
            }
        }
    }

    /// Creates a task on the active board.
    pub async fn create_task(&mut self, draft: TaskDraft) -> Option<TaskId> {
        let Some(board) = self.store.active_board_id() else {
            self.notifier.notify(Notice::error("Failed to create task"));
            return None;
        };
        match self.gateway.create_task(board, draft).await {
            Ok(task) => {
                let id = task.id();
                self.store.dispatch(StoreAction::InsertTask(task));
                self.notifier
                    .notify(Notice::success("Task created successfully"));
                Some(id)
            }
            Err(error) => {
                self.report(&error, "Failed to create task");
                None
            }
        }
    }

    /// Edits a task and stores the server's copy.
    pub async fn update_task(&mut self, task: TaskId, update: TaskUpdate) -> bool {
        match self.gateway.update_task(task, update).await {
            Ok(updated) => {
                self.store.dispatch(StoreAction::ReplaceTask {
                    operation: None,
                    task: updated,
                });
                self.notifier
                    .notify(Notice::success("Task updated successfully"));
                true
            }
            Err(error) => {
                self.report(&error, "Failed to update task");
                false
            }
        }
    }

    /// Deletes a task.
    pub async fn delete_task(&mut self, task: TaskId) -> bool {
        match self.gateway.delete_task(task).await {
            Ok(()) => {
                self.store.dispatch(StoreAction::RemoveTask(task));
                self.notifier
                    .notify(Notice::success("Task deleted successfully"));
                true
            }
            Err(error) => {
                self.report(&error, "Failed to delete task");
                false
            }
        }
    }

    /// Adds a comment to a task.
    pub async fn add_comment(&mut self, task: TaskId, content: &str) -> bool {
        match self.gateway.add_comment(task, content.to_owned()).await {
            Ok(comment) => {
                self.store.dispatch(StoreAction::AppendComment(comment));
                self.notifier.notify(Notice::success("Comment added"));
                true
            }
            Err(error) => {
                self.report(&error, "Failed to add comment");
                false
            }
        }
    }

    fn resolve(&self, raw: &str) -> Option<DropTarget> {
        let board = self.store.active_board()?;
        ColumnResolver::new(board, self.store.tasks()).resolve(raw)
    }

    fn report(&self, error: &GatewayError, message: &str) {
        tracing::warn!(error = %error, "{message}");
        let notice = match error {
            GatewayError::Unauthorized => Notice::sign_in_required(),
            _ => Notice::error(message),
        };
        self.notifier.notify(notice);
    }
}

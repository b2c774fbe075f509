//! State container for the active board.

use crate::board::domain::{Board, BoardId};
use crate::task::domain::{Comment, Placement, Task, TaskId, TaskMove, TaskStatus};
use crate::user::domain::User;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Monotonic identifier of one persistence batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(u64);

impl OperationId {
    /// Returns the raw sequence number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op-{}", self.0)
    }
}

/// Every mutation the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    /// Replaces the board list, keeping the active board when still present
    /// and otherwise selecting the first board.
    LoadBoards(Vec<Board>),
    /// Replaces the user directory.
    LoadUsers(Vec<User>),
    /// Replaces the tasks of the active board.
    LoadTasks(Vec<Task>),
    /// Replaces the tasks of the active board with a server snapshot while
    /// tasks owned by a live operation keep their local placement.
    MergeTasks(Vec<Task>),
    /// Switches the active board and clears its tasks until they load.
    SelectBoard(BoardId),
    /// Appends a newly created board and makes it active.
    InsertBoard(Board),
    /// Provisionally places the dragged task while hovering.
    PreviewMove(TaskMove),
    /// Optimistically applies the placements of an operation.
    ApplyPlacements {
        /// Operation writing the placements.
        operation: OperationId,
        /// Placements to apply.
        placements: Vec<TaskMove>,
    },
    /// Restores placements of tasks still owned by the operation.
    Rollback {
        /// Operation being reverted.
        operation: OperationId,
        /// Pre-drag placements.
        placements: Vec<TaskMove>,
    },
    /// Replaces a task with the server's representation.
    ///
    /// With an operation, the replacement only lands while that operation
    /// is still the task's last writer.
    ReplaceTask {
        /// Operation the response belongs to, if any.
        operation: Option<OperationId>,
        /// Server representation.
        task: Task,
    },
    /// Releases ownership of every task still held by the operation.
    Complete(OperationId),
    /// Appends a created task.
    InsertTask(Task),
    /// Drops a deleted task.
    RemoveTask(TaskId),
    /// Appends a comment to its task.
    AppendComment(Comment),
}

/// In-memory state of the dashboard.
///
/// Only [`TaskStore::dispatch`] mutates it. Each task remembers the last
/// operation that optimistically wrote it, so responses of superseded
/// operations cannot overwrite newer local state.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    boards: Vec<Board>,
    users: Vec<User>,
    tasks: Vec<Task>,
    active_board: Option<BoardId>,
    last_writer: HashMap<TaskId, OperationId>,
    next_operation: u64,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the loaded boards.
    #[must_use]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Returns the loaded users.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Returns the active board's tasks in store order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the active board identifier.
    #[must_use]
    pub const fn active_board_id(&self) -> Option<BoardId> {
        self.active_board
    }

    /// Returns the active board.
    #[must_use]
    pub fn active_board(&self) -> Option<&Board> {
        let id = self.active_board?;
        self.boards.iter().find(|board| board.id() == id)
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the tasks of one lane ordered by `order`, ties by store
    /// position.
    #[must_use]
    pub fn tasks_in(&self, status: TaskStatus) -> Vec<&Task> {
        let mut lane: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|task| task.status() == status)
            .collect();
        lane.sort_by_key(|task| task.order());
        lane
    }

    /// Returns the operation that last wrote the task optimistically.
    #[must_use]
    pub fn last_writer(&self, id: TaskId) -> Option<OperationId> {
        self.last_writer.get(&id).copied()
    }

    /// Allocates the next operation identifier.
    pub fn next_operation(&mut self) -> OperationId {
        self.next_operation += 1;
        OperationId(self.next_operation)
    }

    /// Applies one action.
    pub fn dispatch(&mut self, action: StoreAction) {
        match action {
            StoreAction::LoadBoards(boards) => self.load_boards(boards),
            StoreAction::LoadUsers(users) => self.users = users,
            StoreAction::LoadTasks(tasks) => {
                self.tasks = tasks;
                self.last_writer.clear();
            }
            StoreAction::MergeTasks(tasks) => self.merge_tasks(tasks),
            StoreAction::SelectBoard(id) => self.select_board(id),
            StoreAction::InsertBoard(board) => {
                let id = board.id();
                self.boards.push(board);
                self.select_board(id);
            }
            StoreAction::PreviewMove(mv) => {
                // The user took the task over; older responses no longer apply.
                self.last_writer.remove(&mv.task_id);
                self.place(mv.task_id, mv.placement);
            }
            StoreAction::ApplyPlacements {
                operation,
                placements,
            } => {
                for mv in placements {
                    if self.place(mv.task_id, mv.placement) {
                        self.last_writer.insert(mv.task_id, operation);
                    }
                }
            }
            StoreAction::Rollback {
                operation,
                placements,
            } => {
                for mv in placements {
                    if self.owned_by(mv.task_id, operation) {
                        self.place(mv.task_id, mv.placement);
                        self.last_writer.remove(&mv.task_id);
                    }
                }
            }
            StoreAction::ReplaceTask { operation, task } => {
                let id = task.id();
                if operation.is_some_and(|op| !self.owned_by(id, op)) {
                    return;
                }
                if let Some(slot) = self.tasks.iter_mut().find(|stored| stored.id() == id) {
                    *slot = task;
                    self.last_writer.remove(&id);
                }
            }
            StoreAction::Complete(operation) => {
                self.last_writer.retain(|_, writer| *writer != operation);
            }
            StoreAction::InsertTask(task) => {
                if self.active_board == Some(task.board_id()) {
                    self.tasks.push(task);
                }
            }
            StoreAction::RemoveTask(id) => {
                self.tasks.retain(|task| task.id() != id);
                self.last_writer.remove(&id);
            }
            StoreAction::AppendComment(comment) => {
                if let Some(task) = self
                    .tasks
                    .iter_mut()
                    .find(|task| task.id() == comment.task_id())
                {
                    task.push_comment(comment);
                }
            }
        }
    }

    fn load_boards(&mut self, boards: Vec<Board>) {
        self.boards = boards;
        let still_present = self
            .active_board
            .is_some_and(|id| self.boards.iter().any(|board| board.id() == id));
        if still_present {
            return;
        }
        self.active_board = None;
        self.tasks.clear();
        self.last_writer.clear();
        if let Some(id) = self.boards.first().map(Board::id) {
            self.select_board(id);
        }
    }

    fn merge_tasks(&mut self, incoming: Vec<Task>) {
        let merged: Vec<Task> = incoming
            .into_iter()
            .map(|mut task| {
                if let Some(placement) = self.owned_placement(task.id()) {
                    task.place(placement);
                }
                task
            })
            .collect();
        self.tasks = merged;
        let tasks = &self.tasks;
        self.last_writer
            .retain(|id, _| tasks.iter().any(|task| task.id() == *id));
    }

    fn owned_placement(&self, id: TaskId) -> Option<Placement> {
        if !self.last_writer.contains_key(&id) {
            return None;
        }
        self.task(id).map(Task::placement)
    }

    fn select_board(&mut self, id: BoardId) {
        if self.active_board != Some(id) {
            self.tasks.clear();
            self.last_writer.clear();
        }
        self.active_board = Some(id);
    }

    fn owned_by(&self, id: TaskId, operation: OperationId) -> bool {
        self.last_writer.get(&id) == Some(&operation)
    }

    fn place(&mut self, id: TaskId, placement: Placement) -> bool {
        self.tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .map(|task| task.place(placement))
            .is_some()
    }
}

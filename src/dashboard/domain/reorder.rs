//! Turns a completed drop into forward and inverse placements.

use super::{ColumnResolver, DropTarget};
use crate::board::domain::Board;
use crate::task::domain::{Placement, Task, TaskId, TaskMove, TaskStatus};

/// How a drop changes the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Only the dragged task changes lane; its order is kept.
    StatusOnly,
    /// The target lane is renumbered `0..n`.
    Reorder,
}

/// Placements to apply for a drop, and the ones that undo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    task_id: TaskId,
    kind: MoveKind,
    status: TaskStatus,
    forward: Vec<TaskMove>,
    inverse: Vec<TaskMove>,
}

impl MoveCommand {
    /// Returns the dragged task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the kind of change.
    #[must_use]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns the lane the dragged task ends up in.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the placements to apply.
    #[must_use]
    pub fn forward(&self) -> &[TaskMove] {
        &self.forward
    }

    /// Returns the pre-drag placements of every touched task.
    #[must_use]
    pub fn inverse(&self) -> &[TaskMove] {
        &self.inverse
    }
}

/// Plans drops against a board and the tasks currently in the store.
#[derive(Debug, Clone, Copy)]
pub struct ReorderEngine<'a> {
    resolver: ColumnResolver<'a>,
    tasks: &'a [Task],
}

impl<'a> ReorderEngine<'a> {
    /// Creates an engine over a board and its tasks.
    #[must_use]
    pub const fn new(board: &'a Board, tasks: &'a [Task]) -> Self {
        Self {
            resolver: ColumnResolver::new(board, tasks),
            tasks,
        }
    }

    /// Plans the drop of `dragged` on `target`.
    ///
    /// `recorded` is the placement recorded at drag start; the task's current
    /// placement stands in when it is missing. Returns `None` when the drop
    /// changes nothing or the dragged task is unknown.
    #[must_use]
    pub fn plan(
        &self,
        dragged: TaskId,
        recorded: Option<Placement>,
        target: DropTarget,
    ) -> Option<MoveCommand> {
        let task = self.find(dragged)?;
        let origin = recorded.unwrap_or_else(|| task.placement());
        match target {
            DropTarget::Column(status) => self.relabel(task, origin, status),
            DropTarget::Task(target_id) if target_id == dragged => None,
            DropTarget::Task(target_id) => {
                let target = self.find(target_id)?;
                self.reorder(task, origin, target)
            }
        }
    }

    fn find(&self, id: TaskId) -> Option<&'a Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    fn relabel(&self, task: &Task, origin: Placement, status: TaskStatus) -> Option<MoveCommand> {
        if status == origin.status {
            return None;
        }
        let placement = self.resolver.placement(status, task.order())?;
        Some(MoveCommand {
            task_id: task.id(),
            kind: MoveKind::StatusOnly,
            status,
            forward: vec![TaskMove::new(task.id(), placement)],
            inverse: vec![TaskMove::new(task.id(), origin)],
        })
    }

    fn reorder(&self, task: &'a Task, origin: Placement, target: &Task) -> Option<MoveCommand> {
        let status = target.status();
        let mut lane: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|candidate| candidate.status() == status)
            .collect();
        lane.sort_by_key(|candidate| candidate.order());
        if !lane.iter().any(|candidate| candidate.id() == task.id()) {
            lane.push(task);
        }
        let from = lane.iter().position(|candidate| candidate.id() == task.id())?;
        let to = lane.iter().position(|candidate| candidate.id() == target.id())?;
        if from == to {
            return self.relabel(task, origin, status);
        }
        let moved = lane.remove(from);
        lane.insert(to, moved);

        let column = self.resolver.column(status)?;
        let mut forward = Vec::with_capacity(lane.len());
        let mut inverse = Vec::with_capacity(lane.len());
        for (index, member) in lane.iter().enumerate() {
            let order = i32::try_from(index).ok()?;
            forward.push(TaskMove::new(
                member.id(),
                Placement {
                    status,
                    column_id: column.id(),
                    order,
                },
            ));
            let before = if member.id() == task.id() {
                origin
            } else {
                member.placement()
            };
            inverse.push(TaskMove::new(member.id(), before));
        }
        Some(MoveCommand {
            task_id: task.id(),
            kind: MoveKind::Reorder,
            status,
            forward,
            inverse,
        })
    }
}

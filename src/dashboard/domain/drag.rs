//! Tracks the task being dragged.

use super::DropTarget;
use crate::task::domain::{Placement, Task, TaskId};

/// One drag gesture, from pick-up to release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    task_id: TaskId,
    origin: Placement,
    hover: Option<DropTarget>,
}

impl DragSession {
    /// Returns the dragged task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the placement the task had when it was picked up.
    #[must_use]
    pub const fn origin(&self) -> Placement {
        self.origin
    }

    /// Returns the target currently under the pointer.
    #[must_use]
    pub const fn hover(&self) -> Option<DropTarget> {
        self.hover
    }
}

/// Holds at most one drag session.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    session: Option<DragSession>,
}

impl DragTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts dragging `task`, replacing any unfinished session.
    pub fn start(&mut self, task: &Task) {
        self.session = Some(DragSession {
            task_id: task.id(),
            origin: task.placement(),
            hover: None,
        });
    }

    /// Records the target under the pointer.
    pub fn hover(&mut self, target: Option<DropTarget>) {
        if let Some(session) = self.session.as_mut() {
            session.hover = target;
        }
    }

    /// Returns the active session.
    #[must_use]
    pub const fn active(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Ends the gesture and hands back its session.
    pub fn finish(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

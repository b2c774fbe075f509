//! Task aggregate root.

use super::{
    Attachment, Comment, Placement, Priority, TaskDomainError, TaskDraft, TaskId, TaskStatus,
    TaskTitle, TaskUpdate, normalize_tags,
};
use crate::board::domain::{BoardId, ColumnId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// A unit of work placed in one column of one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    board_id: BoardId,
    title: TaskTitle,
    description: Option<String>,
    placement: Placement,
    priority: Priority,
    assignee: Option<UserId>,
    due_date: Option<DateTime<Utc>>,
    tags: Vec<String>,
    comments: Vec<Comment>,
    attachments: Vec<Attachment>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted identifier.
    pub id: TaskId,
    /// Persisted board.
    pub board_id: BoardId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted placement.
    pub placement: Placement,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted assignee.
    pub assignee: Option<UserId>,
    /// Persisted due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted tags.
    pub tags: Vec<String>,
    /// Persisted comments, oldest first.
    pub comments: Vec<Comment>,
    /// Persisted attachments, oldest first.
    pub attachments: Vec<Attachment>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task from a draft at a resolved placement.
    ///
    /// The draft's own column and status are ignored; callers resolve them
    /// against the board first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the title is empty, the description
    /// is too short or the order is negative.
    pub fn new(
        board_id: BoardId,
        draft: TaskDraft,
        placement: Placement,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        if placement.order < 0 {
            return Err(TaskDomainError::NegativeOrder(placement.order));
        }
        let description = draft.validated_description()?;
        let title = TaskTitle::new(draft.title)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            board_id,
            title,
            description,
            placement,
            priority: draft.priority,
            assignee: draft.assignee,
            due_date: draft.due_date,
            tags: normalize_tags(draft.tags),
            comments: Vec::new(),
            attachments: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            board_id: data.board_id,
            title: data.title,
            description: data.description,
            placement: data.placement,
            priority: data.priority,
            assignee: data.assignee,
            due_date: data.due_date,
            tags: data.tags,
            comments: data.comments,
            attachments: data.attachments,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning board.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns status, column and order together.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Returns the lane the task is in.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.placement.status
    }

    /// Returns the column the task is in.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.placement.column_id
    }

    /// Returns the position within the column.
    #[must_use]
    pub const fn order(&self) -> i32 {
        self.placement.order
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the tags in insertion order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns comments, oldest first.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns attachments, oldest first.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the task is finished.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.placement.status == TaskStatus::Done
    }

    /// Applies the content fields of `update`.
    ///
    /// Placement fields are ignored here; they are resolved against the
    /// board and applied through [`Task::place`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when a blank title is supplied.
    pub fn apply_update(
        &mut self,
        update: &TaskUpdate,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if let Some(title) = &update.title {
            self.title = TaskTitle::new(title.as_str())?;
        }
        if let Some(description) = &update.description {
            self.description = description
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned);
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(assignee) = update.assignee {
            self.assignee = assignee;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(tags) = &update.tags {
            self.tags = normalize_tags(tags);
        }
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Moves the task without touching its timestamps.
    pub const fn place(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// Records a modification time.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }

    pub(crate) const fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    /// Takes comments and attachments from the stored copy of this task.
    pub(crate) fn adopt_children(&mut self, stored: &Self) {
        self.comments.clone_from(&stored.comments);
        self.attachments.clone_from(&stored.attachments);
    }

    /// Appends a comment.
    pub fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Appends an attachment.
    pub fn push_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }
}

/// Sorts tasks in board order: lane, then order, newest first on ties.
pub fn sort_for_board(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| (task.status(), task.order(), Reverse(task.created_at())));
}

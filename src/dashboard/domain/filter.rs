//! Narrowing the visible tasks.

use crate::task::domain::{Priority, Task, TaskStatus};
use crate::user::domain::UserId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive range of calendar days, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDateRange {
    /// First day of the range.
    pub from: NaiveDate,
    /// Last day of the range.
    pub to: NaiveDate,
}

impl DueDateRange {
    /// Returns whether `day` falls within the range.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }
}

/// Criteria a task must meet to stay visible. Empty criteria match all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Only tasks assigned to this user.
    pub assignee: Option<UserId>,
    /// Only tasks carrying at least one of these tags.
    pub tags: Vec<String>,
    /// Only tasks of this priority.
    pub priority: Option<Priority>,
    /// Only tasks in this lane.
    pub status: Option<TaskStatus>,
    /// Only tasks due within this range. Tasks without a due date pass.
    pub due: Option<DueDateRange>,
}

impl TaskFilter {
    /// Returns whether `task` meets every criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if self.assignee.is_some_and(|user| task.assignee() != Some(user)) {
            return false;
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|tag| task.tags().contains(tag)) {
            return false;
        }
        if self.priority.is_some_and(|priority| task.priority() != priority) {
            return false;
        }
        if self.status.is_some_and(|status| task.status() != status) {
            return false;
        }
        match (self.due, task.due_date()) {
            (Some(range), Some(due)) => range.contains(due.date_naive()),
            _ => true,
        }
    }

    /// Returns the matching tasks in their original order.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }

    /// Counts the criteria currently set.
    #[must_use]
    pub fn active_count(&self) -> usize {
        [
            self.assignee.is_some(),
            !self.tags.is_empty(),
            self.priority.is_some(),
            self.status.is_some(),
            self.due.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Adds a tag criterion unless it is blank or already present.
    pub fn add_tag(&mut self, tag: &str) {
        let trimmed = tag.trim();
        if !trimmed.is_empty() && !self.tags.iter().any(|existing| existing == trimmed) {
            self.tags.push(trimmed.to_owned());
        }
    }

    /// Removes a tag criterion.
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|existing| existing != tag);
    }

    /// Drops every criterion.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Every tag used by `tasks`, unique, in first-seen order.
#[must_use]
pub fn all_tags(tasks: &[Task]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for tag in tasks.iter().flat_map(Task::tags) {
        if !seen.contains(tag) {
            seen.push(tag.clone());
        }
    }
    seen
}

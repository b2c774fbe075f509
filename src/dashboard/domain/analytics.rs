//! Board summary figures.

use crate::task::domain::{Priority, Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts derived from a list of tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardAnalytics {
    /// Number of tasks.
    pub total: usize,
    /// Number of finished tasks.
    pub completed: usize,
    /// Finished tasks as a percentage of all tasks; `0.0` when empty.
    pub completion_rate: f64,
    /// Tasks per lane, every lane present.
    pub by_status: BTreeMap<TaskStatus, usize>,
    /// Tasks per priority, every priority present.
    pub by_priority: BTreeMap<Priority, usize>,
    /// Unfinished tasks whose due date has passed.
    pub overdue: usize,
}

impl BoardAnalytics {
    /// Summarises `tasks` as of `now`.
    #[must_use]
    pub fn compute<'a, I>(tasks: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut by_status: BTreeMap<TaskStatus, usize> =
            TaskStatus::ALL.into_iter().map(|status| (status, 0)).collect();
        let mut by_priority: BTreeMap<Priority, usize> =
            Priority::ALL.into_iter().map(|priority| (priority, 0)).collect();
        let mut total = 0;
        let mut overdue = 0;
        for task in tasks {
            total += 1;
            *by_status.entry(task.status()).or_default() += 1;
            *by_priority.entry(task.priority()).or_default() += 1;
            if !task.is_done() && task.due_date().is_some_and(|due| due < now) {
                overdue += 1;
            }
        }
        let completed = by_status.get(&TaskStatus::Done).copied().unwrap_or_default();
        #[expect(
            clippy::cast_precision_loss,
            clippy::float_arithmetic,
            reason = "a percentage of task counts far below f64 precision limits"
        )]
        let completion_rate = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        Self {
            total,
            completed,
            completion_rate,
            by_status,
            by_priority,
            overdue,
        }
    }
}

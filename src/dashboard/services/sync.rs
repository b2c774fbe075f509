//! Pushes optimistic moves to the backend.

use crate::dashboard::{
    domain::{MoveCommand, MoveKind, OperationId},
    ports::{GatewayError, GatewayResult, KanbanGateway},
};
use crate::task::domain::{Task, TaskMove, TaskUpdate};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How a multi-task reorder is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    /// One update per task, all in flight at once.
    #[default]
    Concurrent,
    /// One all-or-nothing batch request.
    Atomic,
}

/// Persistence behaviour of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// How reorders are sent.
    pub batch_mode: BatchMode,
    /// Reload the board's tasks after a concurrent batch partly succeeded.
    pub refetch_after_partial_failure: bool,
}

/// A move applied locally and waiting for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    operation: OperationId,
    command: MoveCommand,
}

impl PendingMove {
    /// Pairs a command with the operation that applied it.
    #[must_use]
    pub const fn new(operation: OperationId, command: MoveCommand) -> Self {
        Self { operation, command }
    }

    /// Returns the operation identifier.
    #[must_use]
    pub const fn operation(&self) -> OperationId {
        self.operation
    }

    /// Returns the planned move.
    #[must_use]
    pub const fn command(&self) -> &MoveCommand {
        &self.command
    }
}

/// Result of pushing one pending move.
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// Every request succeeded.
    Persisted {
        /// Server copy of the task when the batch was a single request.
        replacement: Option<Task>,
    },
    /// At least one request failed.
    Failed {
        /// First failure observed.
        error: GatewayError,
        /// Requests that did succeed.
        succeeded: usize,
    },
}

impl SyncOutcome {
    /// Returns whether the move was persisted.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted { .. })
    }
}

/// Sends pending moves through the gateway.
pub struct MoveSynchronizer<G: KanbanGateway> {
    gateway: Arc<G>,
    config: SyncConfig,
}

impl<G: KanbanGateway> Clone for MoveSynchronizer<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            config: self.config,
        }
    }
}

impl<G: KanbanGateway> MoveSynchronizer<G> {
    /// Creates a synchronizer.
    #[must_use]
    pub const fn new(gateway: Arc<G>, config: SyncConfig) -> Self {
        Self { gateway, config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> SyncConfig {
        self.config
    }

    /// Persists a pending move. Failures are reported, never retried.
    pub async fn push(&self, pending: &PendingMove) -> SyncOutcome {
        let command = pending.command();
        tracing::debug!(
            operation = %pending.operation(),
            task_id = %command.task_id(),
            requests = command.forward().len(),
            "pushing move"
        );
        let outcome = match (command.kind(), self.config.batch_mode) {
            (MoveKind::StatusOnly, _) => {
                let update = TaskUpdate::new().with_status(command.status());
                single(self.gateway.update_task(command.task_id(), update).await)
            }
            (MoveKind::Reorder, BatchMode::Atomic) => {
                match self.gateway.apply_moves(command.forward().to_vec()).await {
                    Ok(mut tasks) if tasks.len() == 1 => SyncOutcome::Persisted {
                        replacement: tasks.pop(),
                    },
                    Ok(_) => SyncOutcome::Persisted { replacement: None },
                    Err(error) => SyncOutcome::Failed {
                        error,
                        succeeded: 0,
                    },
                }
            }
            (MoveKind::Reorder, BatchMode::Concurrent) => {
                self.push_concurrently(command.forward()).await
            }
        };
        if let SyncOutcome::Failed { error, succeeded } = &outcome {
            tracing::warn!(
                operation = %pending.operation(),
                error = %error,
                succeeded,
                "move was not persisted"
            );
        }
        outcome
    }

    async fn push_concurrently(&self, moves: &[TaskMove]) -> SyncOutcome {
        let requests = moves.iter().map(|mv| {
            let update = TaskUpdate::new()
                .with_status(mv.placement.status)
                .with_order(mv.placement.order);
            self.gateway.update_task(mv.task_id, update)
        });
        let results = join_all(requests).await;
        let total = results.len();
        let mut persisted = Vec::with_capacity(total);
        let mut first_error = None;
        for result in results {
            match result {
                Ok(task) => persisted.push(task),
                Err(error) if first_error.is_none() => first_error = Some(error),
                Err(_) => {}
            }
        }
        match first_error {
            Some(error) => SyncOutcome::Failed {
                error,
                succeeded: persisted.len(),
            },
            None if total == 1 => SyncOutcome::Persisted {
                replacement: persisted.pop(),
            },
            None => SyncOutcome::Persisted { replacement: None },
        }
    }
}

fn single(result: GatewayResult<Task>) -> SyncOutcome {
    match result {
        Ok(task) => SyncOutcome::Persisted {
            replacement: Some(task),
        },
        Err(error) => SyncOutcome::Failed {
            error,
            succeeded: 0,
        },
    }
}

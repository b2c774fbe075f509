//! Loads boards, users and tasks for rendering.

use crate::board::domain::{Board, BoardId};
use crate::dashboard::ports::{GatewayResult, KanbanGateway};
use crate::task::domain::Task;
use crate::user::domain::User;
use futures_util::future::try_join;
use std::sync::Arc;

/// Read side of the dashboard.
pub struct BoardReadModel<G: KanbanGateway> {
    gateway: Arc<G>,
}

impl<G: KanbanGateway> BoardReadModel<G> {
    /// Creates a read model over the gateway.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Fetches visible boards and the user directory together.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::dashboard::ports::GatewayError`] raised.
    pub async fn directory(&self) -> GatewayResult<(Vec<Board>, Vec<User>)> {
        try_join(self.gateway.list_boards(), self.gateway.list_users()).await
    }

    /// Fetches a board's tasks in board order.
    ///
    /// # Errors
    ///
    /// Returns the gateway error when the board cannot be read.
    pub async fn tasks(&self, board: BoardId) -> GatewayResult<Vec<Task>> {
        self.gateway.list_tasks(board).await
    }
}

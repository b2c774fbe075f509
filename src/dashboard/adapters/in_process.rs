//! Gateway that calls the backend services in the same process.

use crate::board::{
    domain::{Board, BoardId},
    ports::BoardRepository,
    services::{BoardService, CreateBoardRequest},
};
use crate::dashboard::ports::{GatewayResult, KanbanGateway};
use crate::task::{
    domain::{Comment, Task, TaskDraft, TaskId, TaskMove, TaskUpdate},
    ports::TaskRepository,
    services::TaskService,
};
use crate::user::{
    domain::{Session, User},
    ports::UserRepository,
    services::UserDirectoryService,
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;

/// [`KanbanGateway`] bound to one session and backed by the services.
pub struct InProcessGateway<T, B, U, C>
where
    T: TaskRepository,
    B: BoardRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    boards: BoardService<B, C>,
    tasks: TaskService<T, B, C>,
    users: UserDirectoryService<U, C>,
    session: Session,
}

impl<T, B, U, C> InProcessGateway<T, B, U, C>
where
    T: TaskRepository,
    B: BoardRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a gateway over the given repositories.
    #[must_use]
    pub fn new(
        tasks: Arc<T>,
        boards: Arc<B>,
        users: Arc<U>,
        clock: Arc<C>,
        session: Session,
    ) -> Self {
        Self {
            boards: BoardService::new(Arc::clone(&boards), Arc::clone(&clock)),
            tasks: TaskService::new(tasks, boards, Arc::clone(&clock)),
            users: UserDirectoryService::new(users, clock),
            session,
        }
    }

    /// Returns the session the gateway acts for.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }
}

#[async_trait]
impl<T, B, U, C> KanbanGateway for InProcessGateway<T, B, U, C>
where
    T: TaskRepository,
    B: BoardRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    async fn list_boards(&self) -> GatewayResult<Vec<Board>> {
        Ok(self.boards.list_boards(&self.session).await?)
    }

    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        Ok(self.users.list(&self.session).await?)
    }

    async fn list_tasks(&self, board: BoardId) -> GatewayResult<Vec<Task>> {
        Ok(self.tasks.list_tasks(&self.session, board).await?)
    }

    async fn update_task(&self, task: TaskId, update: TaskUpdate) -> GatewayResult<Task> {
        Ok(self.tasks.update_task(&self.session, task, update).await?)
    }

    async fn apply_moves(&self, moves: Vec<TaskMove>) -> GatewayResult<Vec<Task>> {
        Ok(self.tasks.apply_moves(&self.session, moves).await?)
    }

    async fn create_task(&self, board: BoardId, draft: TaskDraft) -> GatewayResult<Task> {
        Ok(self.tasks.create_task(&self.session, board, draft).await?)
    }

    async fn delete_task(&self, task: TaskId) -> GatewayResult<()> {
        Ok(self.tasks.delete_task(&self.session, task).await?)
    }

    async fn add_comment(&self, task: TaskId, content: String) -> GatewayResult<Comment> {
        Ok(self.tasks.add_comment(&self.session, task, &content).await?)
    }

    async fn create_board(
        &self,
        name: String,
        description: Option<String>,
    ) -> GatewayResult<Board> {
        let mut request = CreateBoardRequest::new(name);
        if let Some(text) = description {
            request = request.with_description(text);
        }
        Ok(self.boards.create_board(&self.session, request).await?)
    }
}

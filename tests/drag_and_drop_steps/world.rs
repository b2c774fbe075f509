//! Shared world state for drag-and-drop BDD scenarios.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use corkboard::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Board, BoardId},
};
use corkboard::dashboard::{
    adapters::{InProcessGateway, RecordingNotifier},
    ports::{GatewayError, GatewayResult, KanbanGateway},
    services::{DashboardController, SyncConfig},
};
use corkboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Comment, Task, TaskDraft, TaskId, TaskMove, TaskUpdate},
};
use corkboard::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{Session, User, UserId},
};
use mockable::DefaultClock;
use rstest::fixture;

type Backend = InProcessGateway<
    InMemoryTaskRepository,
    InMemoryBoardRepository,
    InMemoryUserRepository,
    DefaultClock,
>;

/// Gateway that counts placement requests and fails updates for chosen tasks.
pub struct FlakyGateway {
    inner: Backend,
    failing: Mutex<HashSet<TaskId>>,
    requests: AtomicUsize,
}

impl FlakyGateway {
    fn new(inner: Backend) -> Self {
        Self {
            inner,
            failing: Mutex::new(HashSet::new()),
            requests: AtomicUsize::new(0),
        }
    }

    /// Makes every later update of `task` fail.
    pub fn fail_updates_for(&self, task: TaskId) {
        self.failing
            .lock()
            .expect("failing set lock")
            .insert(task);
    }

    /// Number of update and batch requests received.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn fails(&self, task: TaskId) -> bool {
        self.failing
            .lock()
            .expect("failing set lock")
            .contains(&task)
    }
}

#[async_trait]
impl KanbanGateway for FlakyGateway {
    async fn list_boards(&self) -> GatewayResult<Vec<Board>> {
        self.inner.list_boards().await
    }

    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        self.inner.list_users().await
    }

    async fn list_tasks(&self, board: BoardId) -> GatewayResult<Vec<Task>> {
        self.inner.list_tasks(board).await
    }

    async fn update_task(&self, task: TaskId, update: TaskUpdate) -> GatewayResult<Task> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.fails(task) {
            return Err(GatewayError::transport(std::io::Error::other(
                "connection reset",
            )));
        }
        self.inner.update_task(task, update).await
    }

    async fn apply_moves(&self, moves: Vec<TaskMove>) -> GatewayResult<Vec<Task>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if moves.iter().any(|mv| self.fails(mv.task_id)) {
            return Err(GatewayError::transport(std::io::Error::other(
                "connection reset",
            )));
        }
        self.inner.apply_moves(moves).await
    }

    async fn create_task(&self, board: BoardId, draft: TaskDraft) -> GatewayResult<Task> {
        self.inner.create_task(board, draft).await
    }

    async fn delete_task(&self, task: TaskId) -> GatewayResult<()> {
        self.inner.delete_task(task).await
    }

    async fn add_comment(&self, task: TaskId, content: String) -> GatewayResult<Comment> {
        self.inner.add_comment(task, content).await
    }

    async fn create_board(
        &self,
        name: String,
        description: Option<String>,
    ) -> GatewayResult<Board> {
        self.inner.create_board(name, description).await
    }
}

/// Scenario world for drag-and-drop behaviour tests.
pub struct DragWorld {
    pub gateway: Arc<FlakyGateway>,
    pub notifier: RecordingNotifier,
    pub controller: DashboardController<FlakyGateway, RecordingNotifier>,
    pub tasks: HashMap<String, TaskId>,
}

impl DragWorld {
    /// Creates a world for a signed-in user with empty repositories.
    #[must_use]
    pub fn new() -> Self {
        let backend = InProcessGateway::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryBoardRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(DefaultClock),
            Session::authenticated(UserId::new()),
        );
        let gateway = Arc::new(FlakyGateway::new(backend));
        let notifier = RecordingNotifier::new();
        let controller = DashboardController::new(
            Arc::clone(&gateway),
            Arc::new(notifier.clone()),
            SyncConfig::default(),
        );
        Self {
            gateway,
            notifier,
            controller,
            tasks: HashMap::new(),
        }
    }

    /// Looks up a task created by a given step.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task titled {title} in scenario world"))
    }
}

impl Default for DragWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DragWorld {
    DragWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Joins task titles with `", "`.
pub fn titles<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> String {
    tasks
        .into_iter()
        .map(|task| task.title().as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

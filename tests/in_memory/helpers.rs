//! Shared test helpers for in-memory integration tests.

use corkboard::board::{adapters::memory::InMemoryBoardRepository, domain::ColumnKey};
use corkboard::dashboard::{
    adapters::{InProcessGateway, RecordingNotifier},
    services::{DashboardController, SyncConfig},
};
use corkboard::task::{adapters::memory::InMemoryTaskRepository, domain::TaskId};
use corkboard::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{Session, User},
    services::{RegisterUserRequest, UserDirectoryService},
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Gateway type used by every test client.
pub type Gateway = InProcessGateway<
    InMemoryTaskRepository,
    InMemoryBoardRepository,
    InMemoryUserRepository,
    DefaultClock,
>;

/// Dashboard controller type used by every test client.
pub type Client = DashboardController<Gateway, RecordingNotifier>;

/// Repositories shared by all clients of one test.
#[derive(Clone, Default)]
pub struct Backend {
    pub tasks: Arc<InMemoryTaskRepository>,
    pub boards: Arc<InMemoryBoardRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

impl Backend {
    /// Registers a user and returns the stored record.
    pub async fn register(&self, name: &str, email: &str) -> User {
        UserDirectoryService::new(Arc::clone(&self.users), Arc::new(DefaultClock))
            .register(RegisterUserRequest::new(name, email))
            .await
            .expect("registration succeeds")
    }

    /// Opens a dashboard client acting for `session`.
    pub fn client(&self, session: Session, config: SyncConfig) -> (Client, RecordingNotifier) {
        let gateway = InProcessGateway::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.boards),
            Arc::clone(&self.users),
            Arc::new(DefaultClock),
            session,
        );
        let notifier = RecordingNotifier::new();
        let client = DashboardController::new(
            Arc::new(gateway),
            Arc::new(notifier.clone()),
            config,
        );
        (client, notifier)
    }

    /// Opens a client for a signed-in user with default sync settings.
    pub fn client_for(&self, user: &User) -> (Client, RecordingNotifier) {
        self.client(Session::authenticated(user.id()), SyncConfig::default())
    }
}

/// Provides fresh shared repositories for each test.
#[fixture]
pub fn backend() -> Backend {
    Backend::default()
}

/// Creates a board through `client` and fills its todo lane with `titles`.
pub async fn seed_board(client: &mut Client, titles: &[&str]) -> Vec<TaskId> {
    client
        .create_board("Sprint", Some("Integration board"))
        .await
        .expect("board created");
    let mut ids = Vec::with_capacity(titles.len());
    for title in titles {
        let id = client
            .create_task(corkboard::task::domain::TaskDraft::new(*title))
            .await
            .expect("task created");
        ids.push(id);
    }
    ids
}

/// Titles of a lane in the client's store, in display order.
pub fn lane(client: &Client, status: ColumnKey) -> Vec<String> {
    client
        .store()
        .tasks_in(status)
        .into_iter()
        .map(|task| task.title().as_str().to_owned())
        .collect()
}

/// Drags `task` over `target` and drops it there.
pub async fn drag_onto(client: &mut Client, task: TaskId, target: &str) -> bool {
    assert!(client.drag_start(task), "task is on the active board");
    client.drag_over(Some(target));
    client.drop_task(Some(target)).await
}

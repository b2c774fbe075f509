//! Builders and mocks shared by dashboard tests.

use crate::board::domain::{Board, BoardId, BoardName, ColumnKey};
use crate::dashboard::ports::{GatewayResult, KanbanGateway};
use crate::task::domain::{
    Comment, Placement, Task, TaskDraft, TaskId, TaskMove, TaskUpdate,
};
use crate::user::domain::{User, UserId};
use async_trait::async_trait;
use mockable::DefaultClock;
use mockall::mock;

mock! {
    pub Gateway {}

    #[async_trait]
    impl KanbanGateway for Gateway {
        async fn list_boards(&self) -> GatewayResult<Vec<Board>>;
        async fn list_users(&self) -> GatewayResult<Vec<User>>;
        async fn list_tasks(&self, board: BoardId) -> GatewayResult<Vec<Task>>;
        async fn update_task(&self, task: TaskId, update: TaskUpdate) -> GatewayResult<Task>;
        async fn apply_moves(&self, moves: Vec<TaskMove>) -> GatewayResult<Vec<Task>>;
        async fn create_task(&self, board: BoardId, draft: TaskDraft) -> GatewayResult<Task>;
        async fn delete_task(&self, task: TaskId) -> GatewayResult<()>;
        async fn add_comment(&self, task: TaskId, content: String) -> GatewayResult<Comment>;
        async fn create_board(
            &self,
            name: String,
            description: Option<String>,
        ) -> GatewayResult<Board>;
    }
}

pub(super) fn board() -> Board {
    Board::new(
        BoardName::new("Sprint").expect("valid name"),
        None,
        UserId::new(),
        &DefaultClock,
    )
    .expect("valid board")
}

pub(super) fn task(board: &Board, title: &str, status: ColumnKey, order: i32) -> Task {
    let column = board.column_for(status).expect("lane exists");
    Task::new(
        board.id(),
        TaskDraft::new(title),
        Placement {
            status,
            column_id: column.id(),
            order,
        },
        &DefaultClock,
    )
    .expect("valid task")
}

/// Returns `task` as it would look after `mv` was applied.
pub(super) fn moved(task: &Task, mv: &TaskMove) -> Task {
    let mut copy = task.clone();
    copy.place(mv.placement);
    copy
}

pub(super) fn titles_in(tasks: &[&Task]) -> Vec<String> {
    tasks
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect()
}

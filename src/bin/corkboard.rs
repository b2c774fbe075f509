//! Command-line front end for Corkboard.
//!
//! ```text
//! corkboard report --user <uuid> [--board <uuid>]
//! corkboard move --user <uuid> --task <uuid> --onto <column-or-task> [--board <uuid>]
//! corkboard demo
//! ```
//!
//! `report` and `move` act on the `PostgreSQL` database named by the
//! configuration. `demo` runs an in-memory walkthrough of the drag-and-drop
//! flow and prints the resulting board.

use chrono::Utc;
use clap::{Parser, Subcommand};
use corkboard::board::{
    adapters::{memory::InMemoryBoardRepository, postgres::PostgresBoardRepository},
    domain::{Board, BoardId},
};
use corkboard::config::{ConfigArgs, ConfigError, CorkboardConfig};
use corkboard::dashboard::{
    adapters::{InProcessGateway, TracingNotifier},
    domain::BoardAnalytics,
    ports::{KanbanGateway, Notifier},
    services::DashboardController,
};
use corkboard::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    domain::{Priority, Task, TaskDraft, TaskId, TaskStatus},
};
use corkboard::user::{
    adapters::{memory::InMemoryUserRepository, postgres::PostgresUserRepository},
    domain::{Session, UserId},
    services::{RegisterUserRequest, UserDirectoryService},
};
use mockable::DefaultClock;
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "corkboard", version, about = "Kanban boards with drag-and-drop reordering")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Prints a board with its lanes and summary figures as JSON.
    Report {
        /// User whose boards are visible.
        #[arg(long)]
        user: Uuid,
        /// Board to print; defaults to the user's first board.
        #[arg(long)]
        board: Option<Uuid>,
    },
    /// Drops a task onto a column key, column id or another task.
    Move {
        /// User performing the move.
        #[arg(long)]
        user: Uuid,
        /// Board holding the task; defaults to the user's first board.
        #[arg(long)]
        board: Option<Uuid>,
        /// Task to drag.
        #[arg(long)]
        task: Uuid,
        /// Drop target.
        #[arg(long)]
        onto: String,
    },
    /// Runs an in-memory walkthrough.
    Demo,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open database pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("failed to load board data")]
    Load,
    #[error("no board is available to this user")]
    NoBoard,
    #[error("task {0} is not on the active board")]
    UnknownTask(TaskId),
    #[error("the move of task {0} was not persisted")]
    MoveFailed(TaskId),
    #[error("demo step failed: {0}")]
    Demo(&'static str),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Lane<'a> {
    key: TaskStatus,
    title: &'a str,
    tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
struct BoardReport<'a> {
    board: &'a Board,
    lanes: Vec<Lane<'a>>,
    analytics: BoardAnalytics,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let config = CorkboardConfig::load(&cli.config)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(error) = run(cli.command, &config).await {
        tracing::error!(error = %error, "corkboard command failed");
        return Err(error.into());
    }
    Ok(())
}

async fn run(command: Command, config: &CorkboardConfig) -> Result<(), CliError> {
    match command {
        Command::Report { user, board } => {
            let mut controller = postgres_controller(config, user)?;
            open_board(&mut controller, board).await?;
            print_report(&controller)
        }
        Command::Move {
            user,
            board,
            task,
            onto,
        } => {
            let mut controller = postgres_controller(config, user)?;
            open_board(&mut controller, board).await?;
            let task_id = TaskId::from_uuid(task);
            drag(&mut controller, task_id, &onto).await?;
            print_report(&controller)
        }
        Command::Demo => demo(config).await,
    }
}

type PostgresGateway = InProcessGateway<
    PostgresTaskRepository,
    PostgresBoardRepository,
    PostgresUserRepository,
    DefaultClock,
>;

fn postgres_controller(
    config: &CorkboardConfig,
    user: Uuid,
) -> Result<DashboardController<PostgresGateway, TracingNotifier>, CliError> {
    let pool = corkboard::postgres::connect(&config.database)?;
    let gateway = InProcessGateway::new(
        Arc::new(PostgresTaskRepository::new(pool.clone())),
        Arc::new(PostgresBoardRepository::new(pool.clone())),
        Arc::new(PostgresUserRepository::new(pool)),
        Arc::new(DefaultClock),
        Session::authenticated(UserId::from_uuid(user)),
    );
    Ok(DashboardController::new(
        Arc::new(gateway),
        Arc::new(TracingNotifier),
        config.sync,
    ))
}

async fn open_board<G, N>(
    controller: &mut DashboardController<G, N>,
    board: Option<Uuid>,
) -> Result<(), CliError>
where
    G: KanbanGateway,
    N: Notifier,
{
    if !controller.load().await {
        return Err(CliError::Load);
    }
    let selected = match board {
        Some(id) => controller.select_board(BoardId::from_uuid(id)).await,
        None => true,
    };
    if !selected {
        return Err(CliError::Load);
    }
    if controller.store().active_board().is_none() {
        return Err(CliError::NoBoard);
    }
    Ok(())
}

async fn drag<G, N>(
    controller: &mut DashboardController<G, N>,
    task: TaskId,
    onto: &str,
) -> Result<(), CliError>
where
    G: KanbanGateway,
    N: Notifier,
{
    if !controller.drag_start(task) {
        return Err(CliError::UnknownTask(task));
    }
    controller.drag_over(Some(onto));
    if controller.drop_task(Some(onto)).await {
        Ok(())
    } else {
        Err(CliError::MoveFailed(task))
    }
}

fn print_report<G, N>(controller: &DashboardController<G, N>) -> Result<(), CliError>
where
    G: KanbanGateway,
    N: Notifier,
{
    let store = controller.store();
    let board = store.active_board().ok_or(CliError::NoBoard)?;
    let lanes = board
        .columns()
        .iter()
        .map(|column| Lane {
            key: column.key(),
            title: column.title(),
            tasks: store.tasks_in(column.key()),
        })
        .collect();
    let report = BoardReport {
        board,
        lanes,
        analytics: controller.analytics(Utc::now()),
    };
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    Ok(())
}

async fn demo(config: &CorkboardConfig) -> Result<(), CliError> {
    let clock = Arc::new(DefaultClock);
    let users = Arc::new(InMemoryUserRepository::new());
    let directory = UserDirectoryService::new(Arc::clone(&users), Arc::clone(&clock));
    let user = directory
        .register(RegisterUserRequest::new("Demo User", "demo@example.com"))
        .await
        .map_err(|_| CliError::Demo("register user"))?;

    let gateway = InProcessGateway::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(InMemoryBoardRepository::new()),
        users,
        clock,
        Session::authenticated(user.id()),
    );
    let mut controller =
        DashboardController::new(Arc::new(gateway), Arc::new(TracingNotifier), config.sync);

    controller
        .create_board("Launch", Some("In-memory walkthrough"))
        .await
        .ok_or(CliError::Demo("create board"))?;
    let mut created = Vec::new();
    for (title, priority) in [
        ("Write release notes", Priority::High),
        ("Tag the release", Priority::Medium),
        ("Announce the launch", Priority::Low),
    ] {
        let id = controller
            .create_task(TaskDraft::new(title).with_priority(priority))
            .await
            .ok_or(CliError::Demo("create task"))?;
        created.push(id);
    }

    let [notes, tag, _announce] = created.as_slice() else {
        return Err(CliError::Demo("expected three tasks"));
    };
    drag(&mut controller, *tag, &notes.to_string()).await?;
    drag(&mut controller, *notes, TaskStatus::InProgress.as_str()).await?;
    print_report(&controller)
}

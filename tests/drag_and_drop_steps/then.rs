//! Then steps for drag-and-drop scenarios.

use super::world::{DragWorld, run_async, titles};
use corkboard::board::domain::ColumnKey;
use corkboard::dashboard::ports::KanbanGateway;
use rstest_bdd_macros::then;

fn parse_status(raw: &str) -> Result<ColumnKey, eyre::Report> {
    ColumnKey::try_from(raw).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

#[then(r#"the todo lane reads "{expected}""#)]
fn todo_lane_reads(world: &DragWorld, expected: String) -> Result<(), eyre::Report> {
    let actual = titles(world.controller.store().tasks_in(ColumnKey::Todo));
    if actual != expected {
        return Err(eyre::eyre!("expected todo lane {expected}, found {actual}"));
    }
    Ok(())
}

#[then(r#"the stored todo lane reads "{expected}""#)]
fn stored_todo_lane_reads(world: &DragWorld, expected: String) -> Result<(), eyre::Report> {
    let board = world
        .controller
        .store()
        .active_board_id()
        .ok_or_else(|| eyre::eyre!("no active board"))?;
    let stored = run_async(world.gateway.list_tasks(board))
        .map_err(|err| eyre::eyre!("listing tasks failed: {err}"))?;
    let actual = titles(
        stored
            .iter()
            .filter(|task| task.status() == ColumnKey::Todo),
    );
    if actual != expected {
        return Err(eyre::eyre!("expected stored lane {expected}, found {actual}"));
    }
    Ok(())
}

#[then(r#"task "{title}" has status "{status}""#)]
fn task_has_status(world: &DragWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let id = world.task_id(&title)?;
    let task = world
        .controller
        .store()
        .task(id)
        .ok_or_else(|| eyre::eyre!("task {title} missing from the store"))?;
    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected {title} in {expected}, found {}",
            task.status()
        ));
    }
    Ok(())
}

#[then(r#"the stored task "{title}" has status "{status}""#)]
fn stored_task_has_status(
    world: &DragWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let id = world.task_id(&title)?;
    let board = world
        .controller
        .store()
        .active_board_id()
        .ok_or_else(|| eyre::eyre!("no active board"))?;
    let stored = run_async(world.gateway.list_tasks(board))
        .map_err(|err| eyre::eyre!("listing tasks failed: {err}"))?;
    let task = stored
        .iter()
        .find(|task| task.id() == id)
        .ok_or_else(|| eyre::eyre!("task {title} missing from the backend"))?;
    let lane = world
        .controller
        .store()
        .active_board()
        .and_then(|board| board.column_for(expected))
        .ok_or_else(|| eyre::eyre!("board has no {expected} lane"))?;
    if task.status() != expected || task.column_id() != lane.id() {
        return Err(eyre::eyre!(
            "expected stored {title} in {expected}, found {}",
            task.status()
        ));
    }
    Ok(())
}

#[then("{count:usize} update requests were sent")]
fn update_requests_sent(world: &DragWorld, count: usize) -> Result<(), eyre::Report> {
    let sent = world.gateway.requests();
    if sent != count {
        return Err(eyre::eyre!("expected {count} requests, found {sent}"));
    }
    Ok(())
}

#[then(r#"the last notice is "{message}""#)]
fn last_notice_is(world: &DragWorld, message: String) -> Result<(), eyre::Report> {
    let notice = world
        .notifier
        .last()
        .ok_or_else(|| eyre::eyre!("no notice was raised"))?;
    if notice.message != message {
        return Err(eyre::eyre!(
            "expected notice {message:?}, found {:?}",
            notice.message
        ));
    }
    Ok(())
}

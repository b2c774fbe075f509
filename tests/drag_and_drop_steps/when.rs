//! When steps for drag-and-drop scenarios.

use super::world::{DragWorld, run_async};
use corkboard::task::domain::TaskId;
use rstest_bdd_macros::when;

fn drag_and_drop(world: &mut DragWorld, task: TaskId, target: &str) -> Result<(), eyre::Report> {
    if !world.controller.drag_start(task) {
        return Err(eyre::eyre!("task {task} could not be picked up"));
    }
    world.controller.drag_over(Some(target));
    run_async(world.controller.drop_task(Some(target)));
    Ok(())
}

#[when(r#"task "{dragged}" is dropped onto task "{target}""#)]
fn dropped_onto_task(
    world: &mut DragWorld,
    dragged: String,
    target: String,
) -> Result<(), eyre::Report> {
    let task = world.task_id(&dragged)?;
    let target_id = world.task_id(&target)?;
    drag_and_drop(world, task, &target_id.to_string())
}

#[when(r#"task "{dragged}" is dropped onto the "{column}" column"#)]
fn dropped_onto_column(
    world: &mut DragWorld,
    dragged: String,
    column: String,
) -> Result<(), eyre::Report> {
    let task = world.task_id(&dragged)?;
    drag_and_drop(world, task, &column)
}

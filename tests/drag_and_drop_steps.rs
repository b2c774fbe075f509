//! Behaviour tests for drag-and-drop reordering with optimistic updates.

#[path = "drag_and_drop_steps/mod.rs"]
mod drag_and_drop_steps_defs;

use drag_and_drop_steps_defs::world::{DragWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/drag_and_drop.feature",
    name = "Dropping a task onto another task reorders the lane"
)]
#[tokio::test(flavor = "multi_thread")]
async fn drop_onto_task_reorders(world: DragWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/drag_and_drop.feature",
    name = "Dropping a task onto another column only changes its status"
)]
#[tokio::test(flavor = "multi_thread")]
async fn drop_onto_column_changes_status(world: DragWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/drag_and_drop.feature",
    name = "A failed update reverts the whole move"
)]
#[tokio::test(flavor = "multi_thread")]
async fn failed_update_reverts_move(world: DragWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/drag_and_drop.feature",
    name = "A failed status change restores the original lane"
)]
#[tokio::test(flavor = "multi_thread")]
async fn failed_status_change_restores_lane(world: DragWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/drag_and_drop.feature",
    name = "Dropping a task onto itself does nothing"
)]
#[tokio::test(flavor = "multi_thread")]
async fn self_drop_is_noop(world: DragWorld) {
    let _ = world;
}

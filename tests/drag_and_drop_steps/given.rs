//! Given steps for drag-and-drop scenarios.

use super::world::{DragWorld, run_async};
use corkboard::task::domain::TaskDraft;
use rstest_bdd_macros::given;

#[given(r#"a board with tasks "{first}", "{second}" and "{third}" in the todo lane"#)]
fn board_with_tasks(
    world: &mut DragWorld,
    first: String,
    second: String,
    third: String,
) -> Result<(), eyre::Report> {
    run_async(world.controller.create_board("Sprint", None))
        .ok_or_else(|| eyre::eyre!("board creation failed"))?;
    for title in [first, second, third] {
        let id = run_async(world.controller.create_task(TaskDraft::new(title.as_str())))
            .ok_or_else(|| eyre::eyre!("creating task {title} failed"))?;
        world.tasks.insert(title, id);
    }
    Ok(())
}

#[given(r#"updates to task "{title}" fail"#)]
fn updates_fail(world: &mut DragWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    world.gateway.fail_updates_for(id);
    Ok(())
}

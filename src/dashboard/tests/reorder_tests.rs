//! Tests for drop planning and target resolution.

use super::support::{board, task};
use crate::board::domain::{Board, ColumnKey};
use crate::dashboard::domain::{ColumnResolver, DropTarget, MoveKind, ReorderEngine};
use crate::task::domain::{Placement, Task, TaskId, TaskMove};
use rstest::{fixture, rstest};

struct Lanes {
    board: Board,
    tasks: Vec<Task>,
}

impl Lanes {
    fn id(&self, title: &str) -> TaskId {
        self.tasks
            .iter()
            .find(|task| task.title().as_str() == title)
            .map(Task::id)
            .expect("task exists")
    }

    fn placement(&self, status: ColumnKey, order: i32) -> Placement {
        ColumnResolver::new(&self.board, &self.tasks)
            .placement(status, order)
            .expect("lane exists")
    }
}

#[fixture]
fn lanes() -> Lanes {
    let board = board();
    let tasks = vec![
        task(&board, "A", ColumnKey::Todo, 0),
        task(&board, "B", ColumnKey::Todo, 1),
        task(&board, "C", ColumnKey::Todo, 2),
        task(&board, "X", ColumnKey::InProgress, 0),
        task(&board, "Y", ColumnKey::InProgress, 1),
    ];
    Lanes { board, tasks }
}

#[rstest]
fn dropping_onto_a_sibling_renumbers_the_lane(lanes: Lanes) {
    let engine = ReorderEngine::new(&lanes.board, &lanes.tasks);
    let command = engine
        .plan(lanes.id("A"), None, DropTarget::Task(lanes.id("B")))
        .expect("order changes");

    assert_eq!(command.kind(), MoveKind::Reorder);
    assert_eq!(
        command.forward(),
        [
            TaskMove::new(lanes.id("B"), lanes.placement(ColumnKey::Todo, 0)),
            TaskMove::new(lanes.id("A"), lanes.placement(ColumnKey::Todo, 1)),
            TaskMove::new(lanes.id("C"), lanes.placement(ColumnKey::Todo, 2)),
        ]
    );
    assert_eq!(
        command.inverse(),
        [
            TaskMove::new(lanes.id("B"), lanes.placement(ColumnKey::Todo, 1)),
            TaskMove::new(lanes.id("A"), lanes.placement(ColumnKey::Todo, 0)),
            TaskMove::new(lanes.id("C"), lanes.placement(ColumnKey::Todo, 2)),
        ]
    );
}

#[rstest]
#[case::first_to_last("A", "C", ["B", "C", "A"])]
#[case::last_to_first("C", "A", ["C", "A", "B"])]
#[case::middle_down("B", "C", ["A", "C", "B"])]
#[case::last_up("C", "B", ["A", "C", "B"])]
fn same_lane_moves_shift_the_tasks_in_between(
    lanes: Lanes,
    #[case] dragged: &str,
    #[case] target: &str,
    #[case] expected: [&str; 3],
) {
    let engine = ReorderEngine::new(&lanes.board, &lanes.tasks);
    let command = engine
        .plan(lanes.id(dragged), None, DropTarget::Task(lanes.id(target)))
        .expect("order changes");

    let titles: Vec<&str> = command
        .forward()
        .iter()
        .map(|mv| {
            lanes
                .tasks
                .iter()
                .find(|task| task.id() == mv.task_id)
                .map(|task| task.title().as_str())
                .expect("moved task exists")
        })
        .collect();
    let orders: Vec<i32> = command.forward().iter().map(|mv| mv.placement.order).collect();
    assert_eq!(titles, expected);
    assert_eq!(orders, [0, 1, 2]);
}

#[rstest]
fn dropping_onto_another_column_only_relabels(lanes: Lanes) {
    let engine = ReorderEngine::new(&lanes.board, &lanes.tasks);
    let command = engine
        .plan(lanes.id("A"), None, DropTarget::Column(ColumnKey::Done))
        .expect("status changes");

    assert_eq!(command.kind(), MoveKind::StatusOnly);
    assert_eq!(command.status(), ColumnKey::Done);
    assert_eq!(
        command.forward(),
        [TaskMove::new(lanes.id("A"), lanes.placement(ColumnKey::Done, 0))]
    );
    assert_eq!(
        command.inverse(),
        [TaskMove::new(lanes.id("A"), lanes.placement(ColumnKey::Todo, 0))]
    );
}

#[rstest]
fn dropping_onto_a_task_in_another_lane_inserts_at_its_index(lanes: Lanes) {
    let engine = ReorderEngine::new(&lanes.board, &lanes.tasks);
    let command = engine
        .plan(lanes.id("C"), None, DropTarget::Task(lanes.id("X")))
        .expect("lane changes");

    assert_eq!(command.kind(), MoveKind::Reorder);
    assert_eq!(command.status(), ColumnKey::InProgress);
    let ids: Vec<TaskId> = command.forward().iter().map(|mv| mv.task_id).collect();
    assert_eq!(ids, [lanes.id("C"), lanes.id("X"), lanes.id("Y")]);
    assert!(
        command
            .forward()
            .iter()
            .all(|mv| mv.placement.status == ColumnKey::InProgress)
    );
    let restored = command
        .inverse()
        .iter()
        .find(|mv| mv.task_id == lanes.id("C"))
        .expect("dragged task restored");
    assert_eq!(restored.placement, lanes.placement(ColumnKey::Todo, 2));
}

#[rstest]
fn dropping_a_task_on_itself_is_ignored(lanes: Lanes) {
    let engine = ReorderEngine::new(&lanes.board, &lanes.tasks);
    let id = lanes.id("B");
    assert_eq!(engine.plan(id, None, DropTarget::Task(id)), None);
}

#[rstest]
fn status_change_compares_against_the_pick_up_lane(mut lanes: Lanes) {
    let origin = lanes.placement(ColumnKey::Todo, 0);
    let preview = lanes.placement(ColumnKey::Done, 0);
    let dragged = lanes.id("A");
    if let Some(previewed) = lanes.tasks.iter_mut().find(|task| task.id() == dragged) {
        previewed.place(preview);
    }
    let engine = ReorderEngine::new(&lanes.board, &lanes.tasks);

    let command = engine
        .plan(dragged, Some(origin), DropTarget::Column(ColumnKey::Done))
        .expect("the previewed move still needs persisting");
    assert_eq!(command.inverse(), [TaskMove::new(dragged, origin)]);

    let back_home = engine.plan(dragged, Some(origin), DropTarget::Column(ColumnKey::Todo));
    assert_eq!(back_home, None);
}

#[rstest]
fn unknown_tasks_and_targets_are_not_planned(lanes: Lanes) {
    let engine = ReorderEngine::new(&lanes.board, &lanes.tasks);
    assert_eq!(
        engine.plan(TaskId::new(), None, DropTarget::Column(ColumnKey::Done)),
        None
    );
    assert_eq!(
        engine.plan(lanes.id("A"), None, DropTarget::Task(TaskId::new())),
        None
    );
}

#[rstest]
fn raw_identifiers_resolve_to_columns_or_tasks(lanes: Lanes) {
    let resolver = ColumnResolver::new(&lanes.board, &lanes.tasks);
    let done = lanes.board.column_for(ColumnKey::Done).expect("done column");

    assert_eq!(
        resolver.resolve("in_progress"),
        Some(DropTarget::Column(ColumnKey::InProgress))
    );
    assert_eq!(
        resolver.resolve(&done.id().to_string()),
        Some(DropTarget::Column(ColumnKey::Done))
    );
    assert_eq!(
        resolver.resolve(&lanes.id("B").to_string()),
        Some(DropTarget::Task(lanes.id("B")))
    );
    assert_eq!(resolver.resolve(&TaskId::new().to_string()), None);
    assert_eq!(resolver.resolve("trash"), None);
}

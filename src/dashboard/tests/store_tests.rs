//! Tests for store actions and last-writer tracking.

use super::support::{board, task, titles_in};
use crate::board::domain::ColumnKey;
use crate::dashboard::domain::{StoreAction, TaskStore};
use crate::task::domain::{Placement, TaskMove, TaskUpdate};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
fn loading_boards_selects_the_first_and_keeps_a_valid_selection() {
    let first = board();
    let second = board();
    let mut store = TaskStore::new();

    store.dispatch(StoreAction::LoadBoards(vec![first.clone(), second.clone()]));
    assert_eq!(store.active_board_id(), Some(first.id()));

    store.dispatch(StoreAction::SelectBoard(second.id()));
    store.dispatch(StoreAction::LoadBoards(vec![first.clone(), second.clone()]));
    assert_eq!(store.active_board_id(), Some(second.id()));

    store.dispatch(StoreAction::LoadBoards(Vec::new()));
    assert_eq!(store.active_board_id(), None);
    assert!(store.active_board().is_none());
}

#[rstest]
fn lanes_are_ordered_by_order_then_store_position() {
    let subject = board();
    let mut store = TaskStore::new();
    store.dispatch(StoreAction::LoadBoards(vec![subject.clone()]));
    store.dispatch(StoreAction::LoadTasks(vec![
        task(&subject, "late", ColumnKey::Todo, 2),
        task(&subject, "tie-a", ColumnKey::Todo, 1),
        task(&subject, "other", ColumnKey::Done, 0),
        task(&subject, "tie-b", ColumnKey::Todo, 1),
    ]));

    assert_eq!(
        titles_in(&store.tasks_in(ColumnKey::Todo)),
        ["tie-a", "tie-b", "late"]
    );
}

#[rstest]
fn stale_operations_do_not_touch_newer_state() {
    let subject = board();
    let a = task(&subject, "A", ColumnKey::Todo, 0);
    let done = subject.column_for(ColumnKey::Done).expect("done column");
    let progress = subject
        .column_for(ColumnKey::InProgress)
        .expect("progress column");
    let mut store = TaskStore::new();
    store.dispatch(StoreAction::LoadBoards(vec![subject.clone()]));
    store.dispatch(StoreAction::LoadTasks(vec![a.clone()]));

    let first = store.next_operation();
    let second = store.next_operation();
    assert!(first < second);

    let to_progress = TaskMove::new(
        a.id(),
        Placement {
            status: ColumnKey::InProgress,
            column_id: progress.id(),
            order: 0,
        },
    );
    let to_done = TaskMove::new(
        a.id(),
        Placement {
            status: ColumnKey::Done,
            column_id: done.id(),
            order: 0,
        },
    );
    store.dispatch(StoreAction::ApplyPlacements {
        operation: first,
        placements: vec![to_progress],
    });
    store.dispatch(StoreAction::ApplyPlacements {
        operation: second,
        placements: vec![to_done],
    });
    assert_eq!(store.last_writer(a.id()), Some(second));

    // The first operation fails late: its rollback must not undo the second.
    store.dispatch(StoreAction::Rollback {
        operation: first,
        placements: vec![TaskMove::new(a.id(), a.placement())],
    });
    // Its success response is stale as well.
    store.dispatch(StoreAction::ReplaceTask {
        operation: Some(first),
        task: a.clone(),
    });
    store.dispatch(StoreAction::Complete(first));

    let current = store.task(a.id()).expect("task present");
    assert_eq!(current.status(), ColumnKey::Done);
    assert_eq!(store.last_writer(a.id()), Some(second));

    store.dispatch(StoreAction::Rollback {
        operation: second,
        placements: vec![TaskMove::new(a.id(), a.placement())],
    });
    assert_eq!(store.last_writer(a.id()), None);
    assert_eq!(store.tasks(), [a]);
}

#[rstest]
fn merged_snapshots_keep_placements_of_live_operations() {
    let subject = board();
    let a = task(&subject, "A", ColumnKey::Todo, 0);
    let b = task(&subject, "B", ColumnKey::Todo, 1);
    let gone = task(&subject, "gone", ColumnKey::Todo, 2);
    let done = subject.column_for(ColumnKey::Done).expect("done column");
    let mut store = TaskStore::new();
    store.dispatch(StoreAction::LoadBoards(vec![subject.clone()]));
    store.dispatch(StoreAction::LoadTasks(vec![a.clone(), b.clone(), gone.clone()]));

    let live = store.next_operation();
    let to_done = Placement {
        status: ColumnKey::Done,
        column_id: done.id(),
        order: 0,
    };
    store.dispatch(StoreAction::ApplyPlacements {
        operation: live,
        placements: vec![TaskMove::new(a.id(), to_done), TaskMove::new(gone.id(), to_done)],
    });

    // The server has not seen the live move yet and no longer has `gone`.
    let mut renamed = b.clone();
    renamed
        .apply_update(&TaskUpdate::new().with_title("B2"), &DefaultClock)
        .expect("valid update");
    store.dispatch(StoreAction::MergeTasks(vec![a.clone(), renamed]));

    let kept = store.task(a.id()).expect("task present");
    assert_eq!(kept.status(), ColumnKey::Done);
    assert_eq!(store.last_writer(a.id()), Some(live));
    assert_eq!(titles_in(&store.tasks_in(ColumnKey::Todo)), ["B2"]);
    assert!(store.task(gone.id()).is_none());
    assert_eq!(store.last_writer(gone.id()), None);

    let mut persisted = a.clone();
    persisted.place(to_done);
    store.dispatch(StoreAction::ReplaceTask {
        operation: Some(live),
        task: persisted.clone(),
    });
    assert_eq!(store.task(a.id()), Some(&persisted));
}

#[rstest]
fn inserted_tasks_for_other_boards_are_ignored() {
    let active = board();
    let other = board();
    let mut store = TaskStore::new();
    store.dispatch(StoreAction::LoadBoards(vec![active.clone(), other.clone()]));

    store.dispatch(StoreAction::InsertTask(task(&other, "elsewhere", ColumnKey::Todo, 0)));
    assert!(store.tasks().is_empty());

    let here = task(&active, "here", ColumnKey::Todo, 0);
    store.dispatch(StoreAction::InsertTask(here.clone()));
    store.dispatch(StoreAction::RemoveTask(here.id()));
    assert!(store.tasks().is_empty());
}

#[rstest]
fn inserting_a_board_selects_it() {
    let existing = board();
    let created = board();
    let mut store = TaskStore::new();
    store.dispatch(StoreAction::LoadBoards(vec![existing.clone()]));
    store.dispatch(StoreAction::LoadTasks(vec![task(&existing, "old", ColumnKey::Todo, 0)]));

    store.dispatch(StoreAction::InsertBoard(created.clone()));

    assert_eq!(store.active_board_id(), Some(created.id()));
    assert_eq!(store.boards().len(), 2);
    assert!(store.tasks().is_empty());
}

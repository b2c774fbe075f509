//! Drag-and-drop persistence observed through a second client.

use super::helpers::{Backend, backend, drag_onto, lane, seed_board};
use corkboard::board::domain::ColumnKey;
use corkboard::dashboard::{
    domain::Notice,
    services::{BatchMode, SyncConfig},
};
use corkboard::user::domain::Session;
use rstest::rstest;

fn config(batch_mode: BatchMode, refetch_after_partial_failure: bool) -> SyncConfig {
    SyncConfig {
        batch_mode,
        refetch_after_partial_failure,
    }
}

#[rstest]
#[case::concurrent(BatchMode::Concurrent)]
#[case::atomic(BatchMode::Atomic)]
#[tokio::test(flavor = "multi_thread")]
async fn reorders_are_visible_to_other_clients(backend: Backend, #[case] mode: BatchMode) {
    let user = backend.register("Rae Reorder", "rae@example.com").await;
    let session = Session::authenticated(user.id());
    let (mut client, notifier) = backend.client(session, config(mode, false));
    let ids = seed_board(&mut client, &["A", "B", "C"]).await;
    let (a, c) = (ids.first().copied().expect("A"), ids.get(2).copied().expect("C"));

    assert!(drag_onto(&mut client, c, &a.to_string()).await);
    assert_eq!(lane(&client, ColumnKey::Todo), ["C", "A", "B"]);
    assert_eq!(notifier.last(), Some(Notice::task_moved()));

    let (mut observer, _) = backend.client_for(&user);
    assert!(observer.load().await);
    assert_eq!(lane(&observer, ColumnKey::Todo), ["C", "A", "B"]);
    let orders: Vec<i32> = observer
        .store()
        .tasks_in(ColumnKey::Todo)
        .iter()
        .map(|task| task.order())
        .collect();
    assert_eq!(orders, [0, 1, 2]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cross_lane_drop_onto_a_task_takes_its_slot(backend: Backend) {
    let user = backend.register("Lane Hopper", "hop@example.com").await;
    let (mut client, _) = backend.client_for(&user);
    let ids = seed_board(&mut client, &["A", "B", "X", "Y"]).await;
    let [a, _b, x, y] = ids.as_slice() else {
        panic!("expected four tasks");
    };
    assert!(drag_onto(&mut client, *x, "in_progress").await);
    assert!(drag_onto(&mut client, *y, "in_progress").await);
    assert_eq!(lane(&client, ColumnKey::InProgress), ["X", "Y"]);

    assert!(drag_onto(&mut client, *a, &y.to_string()).await);
    assert_eq!(lane(&client, ColumnKey::InProgress), ["X", "A", "Y"]);
    assert_eq!(lane(&client, ColumnKey::Todo), ["B"]);

    let (mut observer, _) = backend.client_for(&user);
    assert!(observer.load().await);
    assert_eq!(lane(&observer, ColumnKey::InProgress), ["X", "A", "Y"]);
    let moved = observer.store().task(*a).expect("A persisted");
    let column = observer
        .store()
        .active_board()
        .and_then(|board| board.column_for(ColumnKey::InProgress))
        .expect("in-progress lane");
    assert_eq!(moved.column_id(), column.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn atomic_failure_leaves_the_backend_untouched(backend: Backend) {
    let user = backend.register("Ada Atomic", "ada@example.com").await;
    let session = Session::authenticated(user.id());
    let (mut client, notifier) = backend.client(session, config(BatchMode::Atomic, false));
    let ids = seed_board(&mut client, &["A", "B", "C"]).await;
    let [a, b, c] = ids.as_slice() else {
        panic!("expected three tasks");
    };

    let (mut other, _) = backend.client_for(&user);
    assert!(other.load().await);
    assert!(other.delete_task(*c).await);

    assert!(!drag_onto(&mut client, *a, &b.to_string()).await);
    assert_eq!(lane(&client, ColumnKey::Todo), ["A", "B", "C"]);
    assert_eq!(notifier.last(), Some(Notice::move_reverted()));

    assert!(other.refresh_tasks().await);
    assert_eq!(lane(&other, ColumnKey::Todo), ["A", "B"]);
}

#[rstest]
#[case::trusting_local_state(false, &["A", "B", "C"])]
#[case::refetching(true, &["B", "A"])]
#[tokio::test(flavor = "multi_thread")]
async fn partial_concurrent_failure_is_rolled_back(
    backend: Backend,
    #[case] refetch: bool,
    #[case] expected: &[&str],
) {
    let user = backend.register("Pat Partial", "pat@example.com").await;
    let session = Session::authenticated(user.id());
    let (mut client, notifier) = backend.client(session, config(BatchMode::Concurrent, refetch));
    let ids = seed_board(&mut client, &["A", "B", "C"]).await;
    let [a, b, c] = ids.as_slice() else {
        panic!("expected three tasks");
    };

    let (mut other, _) = backend.client_for(&user);
    assert!(other.load().await);
    assert!(other.delete_task(*c).await);

    assert!(!drag_onto(&mut client, *a, &b.to_string()).await);
    assert_eq!(notifier.last(), Some(Notice::move_reverted()));
    assert_eq!(lane(&client, ColumnKey::Todo), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refetch_after_failure_keeps_newer_moves(backend: Backend) {
    let user = backend.register("Ola Overlap", "ola@example.com").await;
    let session = Session::authenticated(user.id());
    let (mut client, notifier) = backend.client(session, config(BatchMode::Concurrent, true));
    let ids = seed_board(&mut client, &["A", "B", "C", "D"]).await;
    let [a, b, c, d] = ids.as_slice() else {
        panic!("expected four tasks");
    };
    assert!(drag_onto(&mut client, *d, "in_progress").await);

    let (mut other, _) = backend.client_for(&user);
    assert!(other.load().await);
    assert!(other.delete_task(*c).await);

    assert!(client.drag_start(*a));
    let first = client
        .begin_drop(Some(&b.to_string()))
        .expect("reorder planned");
    assert!(client.drag_start(*d));
    let second = client.begin_drop(Some("done")).expect("lane move planned");

    let sync = client.synchronizer();
    let outcome = sync.push(&first).await;
    assert!(!client.settle(first, outcome).await);
    assert_eq!(notifier.last(), Some(Notice::move_reverted()));
    assert_eq!(lane(&client, ColumnKey::Todo), ["B", "A"]);
    assert_eq!(lane(&client, ColumnKey::Done), ["D"]);

    let outcome = sync.push(&second).await;
    assert!(client.settle(second, outcome).await);
    assert_eq!(notifier.last(), Some(Notice::task_moved()));
    assert_eq!(lane(&client, ColumnKey::Done), ["D"]);
    assert!(lane(&client, ColumnKey::InProgress).is_empty());

    let (mut observer, _) = backend.client_for(&user);
    assert!(observer.load().await);
    assert_eq!(lane(&observer, ColumnKey::Done), ["D"]);
}

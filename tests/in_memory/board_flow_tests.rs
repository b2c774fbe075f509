//! Board visibility, membership and task editing across clients.

use super::helpers::{Backend, backend, drag_onto, lane, seed_board};
use chrono::Utc;
use corkboard::board::{domain::ColumnKey, services::BoardService};
use corkboard::dashboard::{
    domain::{Notice, TaskFilter},
    services::SyncConfig,
};
use corkboard::task::domain::{Priority, TaskDraft, TaskUpdate};
use corkboard::user::domain::Session;
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_see_and_move_tasks_on_shared_boards(backend: Backend) {
    let owner = backend.register("Olive Owner", "olive@example.com").await;
    let member = backend.register("Max Member", "max@example.com").await;
    let (mut owner_client, _) = backend.client_for(&owner);
    let ids = seed_board(&mut owner_client, &["Plan", "Build"]).await;
    let board = owner_client
        .store()
        .active_board_id()
        .expect("board is active");

    let (mut member_client, _) = backend.client_for(&member);
    assert!(member_client.load().await);
    assert!(member_client.store().boards().is_empty());
    assert!(member_client.store().tasks().is_empty());

    BoardService::new(Arc::clone(&backend.boards), Arc::new(DefaultClock))
        .add_member(&Session::authenticated(owner.id()), board, member.id())
        .await
        .expect("owner adds member");

    assert!(member_client.load().await);
    assert_eq!(member_client.store().active_board_id(), Some(board));
    assert_eq!(member_client.store().users().len(), 2);
    assert_eq!(lane(&member_client, ColumnKey::Todo), ["Plan", "Build"]);

    let build = ids.get(1).copied().expect("second task");
    assert!(drag_onto(&mut member_client, build, "done").await);

    assert!(owner_client.refresh_tasks().await);
    assert_eq!(lane(&owner_client, ColumnKey::Todo), ["Plan"]);
    assert_eq!(lane(&owner_client, ColumnKey::Done), ["Build"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn anonymous_clients_cannot_load_or_create(backend: Backend) {
    let (mut client, notifier) = backend.client(Session::anonymous(), SyncConfig::default());

    assert!(!client.load().await);
    assert_eq!(notifier.last(), Some(Notice::sign_in_required()));

    assert!(client.create_board("Secret", None).await.is_none());
    assert_eq!(notifier.last(), Some(Notice::sign_in_required()));
    assert!(client.store().boards().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_comments_and_deletes_reach_other_clients(backend: Backend) {
    let user = backend.register("Edie Editor", "edie@example.com").await;
    let (mut writer, notifier) = backend.client_for(&user);
    seed_board(&mut writer, &[]).await;

    let task = writer
        .create_task(
            TaskDraft::new("Draft release notes")
                .with_description("Summarise the changes")
                .with_priority(Priority::High)
                .with_assignee(user.id())
                .with_tags(["docs", " release ", "docs"]),
        )
        .await
        .expect("task created");
    let doomed = writer
        .create_task(TaskDraft::new("Obsolete chore"))
        .await
        .expect("task created");

    assert!(
        writer
            .update_task(
                task,
                TaskUpdate::new()
                    .with_title("Publish release notes")
                    .with_status(ColumnKey::InProgress),
            )
            .await
    );
    assert!(writer.add_comment(task, "  Looks good  ").await);
    assert_eq!(notifier.last(), Some(Notice::success("Comment added")));
    assert!(!writer.add_comment(task, "   ").await);
    assert_eq!(notifier.last(), Some(Notice::error("Failed to add comment")));
    assert!(writer.delete_task(doomed).await);

    let (mut reader, _) = backend.client_for(&user);
    assert!(reader.load().await);
    assert!(reader.store().task(doomed).is_none());
    let stored = reader.store().task(task).expect("task persisted");
    assert_eq!(stored.title().as_str(), "Publish release notes");
    assert_eq!(stored.status(), ColumnKey::InProgress);
    assert_eq!(stored.priority(), Priority::High);
    assert_eq!(stored.tags(), &["docs", "release"]);
    let comments: Vec<&str> = stored
        .comments()
        .iter()
        .map(|comment| comment.content())
        .collect();
    assert_eq!(comments, ["Looks good"]);

    let mut filter = TaskFilter {
        assignee: Some(user.id()),
        ..TaskFilter::default()
    };
    filter.add_tag("release");
    reader.set_filter(filter);
    assert_eq!(reader.visible_tasks().len(), 1);
    assert_eq!(reader.tags(), ["docs", "release"]);

    let analytics = reader.analytics(Utc::now());
    assert_eq!(analytics.total, 1);
    assert_eq!(analytics.by_status.get(&ColumnKey::InProgress), Some(&1));
}

//! `PostgreSQL` repository implementation for tasks.

use super::models::{AttachmentRow, CommentRow, TaskChangeset, TaskRow};
use crate::board::domain::{BoardId, ColumnId, ColumnKey};
use crate::postgres::{
    PgPool, get_conn_with, run_blocking_with,
    schema::{attachments, comments, tasks},
};
use crate::task::{
    domain::{
        Attachment, AttachmentDraft, AttachmentId, Comment, CommentId, PersistedTaskData,
        Placement, Priority, Task, TaskId, TaskMove, TaskTitle, sort_for_board,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a repository from a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, TaskRepositoryError::persistence)?;
                f(&mut connection)
            },
            TaskRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task);
        self.run(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map(|_| ())
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changes = to_changeset(task);
        self.run(move |connection| {
            let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&changes)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let uuid = id.into_inner();
                diesel::delete(comments::table.filter(comments::task_id.eq(uuid)))
                    .execute(tx)
                    .map_err(TaskRepositoryError::persistence)?;
                diesel::delete(attachments::table.filter(attachments::task_id.eq(uuid)))
                    .execute(tx)
                    .map_err(TaskRepositoryError::persistence)?;
                let deleted = diesel::delete(tasks::table.find(uuid))
                    .execute(tx)
                    .map_err(TaskRepositoryError::persistence)?;
                if deleted == 0 {
                    return Err(TaskRepositoryError::NotFound(id));
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run(move |connection| {
            let rows = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let mut assembled = assemble_tasks(connection, rows)?;
            Ok(assembled.pop())
        })
        .await
    }

    async fn list_for_board(&self, board: BoardId) -> TaskRepositoryResult<Vec<Task>> {
        self.run(move |connection| {
            let rows = tasks::table
                .filter(tasks::board_id.eq(board.into_inner()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let mut assembled = assemble_tasks(connection, rows)?;
            // Status strings sort alphabetically in SQL, not in lane order.
            sort_for_board(&mut assembled);
            Ok(assembled)
        })
        .await
    }

    async fn add_comment(&self, comment: &Comment) -> TaskRepositoryResult<()> {
        let task_id = comment.task_id();
        let row = CommentRow {
            id: comment.id().into_inner(),
            task_id: task_id.into_inner(),
            author_id: comment.author_id().into_inner(),
            content: comment.content().to_owned(),
            created_at: comment.created_at(),
        };
        self.run(move |connection| {
            ensure_task_exists(connection, task_id)?;
            diesel::insert_into(comments::table)
                .values(&row)
                .execute(connection)
                .map(|_| ())
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn add_attachment(&self, attachment: &Attachment) -> TaskRepositoryResult<()> {
        let task_id = attachment.task_id();
        let size_bytes =
            i64::try_from(attachment.size_bytes()).map_err(TaskRepositoryError::persistence)?;
        let row = AttachmentRow {
            id: attachment.id().into_inner(),
            task_id: task_id.into_inner(),
            name: attachment.name().to_owned(),
            url: attachment.url().to_owned(),
            mime_type: attachment.mime_type().to_owned(),
            size_bytes,
            created_at: attachment.created_at(),
        };
        self.run(move |connection| {
            ensure_task_exists(connection, task_id)?;
            diesel::insert_into(attachments::table)
                .values(&row)
                .execute(connection)
                .map(|_| ())
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn apply_moves(
        &self,
        moves: &[TaskMove],
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()> {
        let batch = moves.to_vec();
        self.run(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                for mv in &batch {
                    let placement = mv.placement;
                    let updated = diesel::update(tasks::table.find(mv.task_id.into_inner()))
                        .set((
                            tasks::status.eq(placement.status.as_str()),
                            tasks::column_id.eq(placement.column_id.into_inner()),
                            tasks::sort_order.eq(placement.order),
                            tasks::updated_at.eq(updated_at),
                        ))
                        .execute(tx)
                        .map_err(TaskRepositoryError::persistence)?;
                    if updated == 0 {
                        return Err(TaskRepositoryError::NotFound(mv.task_id));
                    }
                }
                Ok(())
            })
        })
        .await
    }
}

fn ensure_task_exists(connection: &mut PgConnection, id: TaskId) -> TaskRepositoryResult<()> {
    let found = tasks::table
        .find(id.into_inner())
        .select(tasks::id)
        .first::<uuid::Uuid>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)?;
    found.map(|_| ()).ok_or(TaskRepositoryError::NotFound(id))
}

fn to_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id().into_inner(),
        board_id: task.board_id().into_inner(),
        column_id: task.column_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().code().to_owned(),
        assignee_id: task.assignee().map(UserId::into_inner),
        due_date: task.due_date(),
        tags: task.tags().to_vec(),
        sort_order: task.order(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        column_id: task.column_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().code().to_owned(),
        assignee_id: task.assignee().map(UserId::into_inner),
        due_date: task.due_date(),
        tags: task.tags().to_vec(),
        sort_order: task.order(),
        updated_at: task.updated_at(),
    }
}

/// Loads comments and attachments for the given rows and builds aggregates.
fn assemble_tasks(
    connection: &mut PgConnection,
    rows: Vec<TaskRow>,
) -> TaskRepositoryResult<Vec<Task>> {
    let ids: Vec<uuid::Uuid> = rows.iter().map(|row| row.id).collect();

    let comment_rows = comments::table
        .filter(comments::task_id.eq_any(ids.clone()))
        .order(comments::created_at.asc())
        .select(CommentRow::as_select())
        .load::<CommentRow>(connection)
        .map_err(TaskRepositoryError::persistence)?;
    let attachment_rows = attachments::table
        .filter(attachments::task_id.eq_any(ids))
        .order(attachments::created_at.asc())
        .select(AttachmentRow::as_select())
        .load::<AttachmentRow>(connection)
        .map_err(TaskRepositoryError::persistence)?;

    let mut comments_by_task: HashMap<uuid::Uuid, Vec<Comment>> = HashMap::new();
    for row in comment_rows {
        comments_by_task
            .entry(row.task_id)
            .or_default()
            .push(Comment::from_persisted(
                CommentId::from_uuid(row.id),
                TaskId::from_uuid(row.task_id),
                UserId::from_uuid(row.author_id),
                row.content,
                row.created_at,
            ));
    }
    let mut attachments_by_task: HashMap<uuid::Uuid, Vec<Attachment>> = HashMap::new();
    for row in attachment_rows {
        let size_bytes = u64::try_from(row.size_bytes).map_err(TaskRepositoryError::persistence)?;
        attachments_by_task
            .entry(row.task_id)
            .or_default()
            .push(Attachment::from_persisted(
                AttachmentId::from_uuid(row.id),
                TaskId::from_uuid(row.task_id),
                AttachmentDraft {
                    name: row.name,
                    url: row.url,
                    mime_type: row.mime_type,
                    size_bytes,
                },
                row.created_at,
            ));
    }

    rows.into_iter()
        .map(|row| {
            let status = ColumnKey::try_from(row.status.as_str())
                .map_err(TaskRepositoryError::persistence)?;
            let priority =
                Priority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
            let title = TaskTitle::new(row.title).map_err(TaskRepositoryError::persistence)?;
            Ok(Task::from_persisted(PersistedTaskData {
                id: TaskId::from_uuid(row.id),
                board_id: BoardId::from_uuid(row.board_id),
                title,
                description: row.description,
                placement: Placement {
                    status,
                    column_id: ColumnId::from_uuid(row.column_id),
                    order: row.sort_order,
                },
                priority,
                assignee: row.assignee_id.map(UserId::from_uuid),
                due_date: row.due_date,
                tags: row.tags,
                comments: comments_by_task.remove(&row.id).unwrap_or_default(),
                attachments: attachments_by_task.remove(&row.id).unwrap_or_default(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            }))
        })
        .collect()
}

//! Diesel row models for tasks, comments and attachments.

use crate::postgres::schema::{attachments, comments, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Task row, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Parent board.
    pub board_id: uuid::Uuid,
    /// Column holding the task.
    pub column_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Status key.
    pub status: String,
    /// Priority code.
    pub priority: String,
    /// Assigned user.
    pub assignee_id: Option<uuid::Uuid>,
    /// Due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Tags in insertion order.
    pub tags: Vec<String>,
    /// Position within the column.
    pub sort_order: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Scalar changes written by a task update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Column holding the task.
    pub column_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Status key.
    pub status: String,
    /// Priority code.
    pub priority: String,
    /// Assigned user.
    pub assignee_id: Option<uuid::Uuid>,
    /// Due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Tags.
    pub tags: Vec<String>,
    /// Position within the column.
    pub sort_order: i32,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Comment row, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Parent task.
    pub task_id: uuid::Uuid,
    /// Author.
    pub author_id: uuid::Uuid,
    /// Body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Attachment row, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = attachments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AttachmentRow {
    /// Attachment identifier.
    pub id: uuid::Uuid,
    /// Parent task.
    pub task_id: uuid::Uuid,
    /// File name.
    pub name: String,
    /// File location.
    pub url: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

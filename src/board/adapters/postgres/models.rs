//! Diesel row models for boards, members and columns.

use crate::postgres::schema::{board_columns, board_members, boards};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for board records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardRow {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Board name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for board records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = boards)]
pub struct NewBoardRow {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Board name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Board membership row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = board_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardMemberRow {
    /// Board identifier.
    pub board_id: uuid::Uuid,
    /// Member identifier.
    pub user_id: uuid::Uuid,
}

/// Board column row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = board_columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Parent board.
    pub board_id: uuid::Uuid,
    /// Semantic key.
    pub column_key: String,
    /// Display title.
    pub title: String,
    /// Display color.
    pub color: String,
    /// Column order index.
    pub position: i32,
}

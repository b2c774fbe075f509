//! `PostgreSQL` repository implementation for boards.

use super::models::{BoardColumnRow, BoardMemberRow, BoardRow, NewBoardRow};
use crate::board::{
    domain::{
        Board, BoardColumn, BoardId, BoardName, ColumnId, ColumnKey, PersistedBoardData,
    },
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};
use crate::postgres::{
    PgPool, get_conn_with, run_blocking_with,
    schema::{board_columns, board_members, boards},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;

/// `PostgreSQL`-backed board repository.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: PgPool,
}

impl PostgresBoardRepository {
    /// Creates a repository from a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, BoardRepositoryError::persistence)?;
                f(&mut connection)
            },
            BoardRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn store(&self, board: &Board) -> BoardRepositoryResult<()> {
        let board_id = board.id();
        let board_row = NewBoardRow {
            id: board_id.into_inner(),
            name: board.name().as_str().to_owned(),
            description: board.description().map(str::to_owned),
            owner_id: board.owner().into_inner(),
            created_at: board.created_at(),
            updated_at: board.updated_at(),
        };
        let column_rows: Vec<BoardColumnRow> = board.columns().iter().map(to_column_row).collect();
        let member_rows = member_rows(board);

        self.run(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::insert_into(boards::table)
                        .values(&board_row)
                        .execute(tx)?;
                    diesel::insert_into(board_columns::table)
                        .values(&column_rows)
                        .execute(tx)?;
                    if !member_rows.is_empty() {
                        diesel::insert_into(board_members::table)
                            .values(&member_rows)
                            .execute(tx)?;
                    }
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateBoard(board_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn update_members(&self, board: &Board) -> BoardRepositoryResult<()> {
        let board_id = board.id();
        let updated_at = board.updated_at();
        let rows = member_rows(board);

        self.run(move |connection| {
            connection
                .transaction::<_, BoardRepositoryError, _>(|tx| {
                    let updated = diesel::update(boards::table.find(board_id.into_inner()))
                        .set(boards::updated_at.eq(updated_at))
                        .execute(tx)
                        .map_err(BoardRepositoryError::persistence)?;
                    if updated == 0 {
                        return Err(BoardRepositoryError::NotFound(board_id));
                    }
                    diesel::delete(
                        board_members::table
                            .filter(board_members::board_id.eq(board_id.into_inner())),
                    )
                    .execute(tx)
                    .map_err(BoardRepositoryError::persistence)?;
                    if !rows.is_empty() {
                        diesel::insert_into(board_members::table)
                            .values(&rows)
                            .execute(tx)
                            .map_err(BoardRepositoryError::persistence)?;
                    }
                    Ok(())
                })
        })
        .await
    }

    async fn find_by_id(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        self.run(move |connection| {
            let rows = boards::table
                .filter(boards::id.eq(id.into_inner()))
                .select(BoardRow::as_select())
                .load::<BoardRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            let mut assembled = assemble_boards(connection, rows)?;
            Ok(assembled.pop())
        })
        .await
    }

    async fn list_accessible(&self, user: UserId) -> BoardRepositoryResult<Vec<Board>> {
        self.run(move |connection| {
            let user_uuid = user.into_inner();
            let member_of = board_members::table
                .filter(board_members::user_id.eq(user_uuid))
                .select(board_members::board_id);
            let rows = boards::table
                .filter(
                    boards::owner_id
                        .eq(user_uuid)
                        .or(boards::id.eq_any(member_of)),
                )
                .order(boards::created_at.asc())
                .select(BoardRow::as_select())
                .load::<BoardRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            assemble_boards(connection, rows)
        })
        .await
    }
}

fn to_column_row(column: &BoardColumn) -> BoardColumnRow {
    BoardColumnRow {
        id: column.id().into_inner(),
        board_id: column.board_id().into_inner(),
        column_key: column.key().as_str().to_owned(),
        title: column.title().to_owned(),
        color: column.color().to_owned(),
        position: column.position(),
    }
}

fn member_rows(board: &Board) -> Vec<BoardMemberRow> {
    board
        .members()
        .iter()
        .map(|member| BoardMemberRow {
            board_id: board.id().into_inner(),
            user_id: member.into_inner(),
        })
        .collect()
}

/// Loads columns and members for the given board rows and builds aggregates.
fn assemble_boards(
    connection: &mut PgConnection,
    rows: Vec<BoardRow>,
) -> BoardRepositoryResult<Vec<Board>> {
    let ids: Vec<uuid::Uuid> = rows.iter().map(|row| row.id).collect();

    let column_rows = board_columns::table
        .filter(board_columns::board_id.eq_any(ids.clone()))
        .select(BoardColumnRow::as_select())
        .load::<BoardColumnRow>(connection)
        .map_err(BoardRepositoryError::persistence)?;
    let member_rows = board_members::table
        .filter(board_members::board_id.eq_any(ids.clone()))
        .select(BoardMemberRow::as_select())
        .load::<BoardMemberRow>(connection)
        .map_err(BoardRepositoryError::persistence)?;

    let mut columns_by_board: HashMap<uuid::Uuid, Vec<BoardColumn>> = HashMap::new();
    for row in column_rows {
        let board_id = row.board_id;
        columns_by_board
            .entry(board_id)
            .or_default()
            .push(row_to_column(row)?);
    }
    let mut members_by_board: HashMap<uuid::Uuid, Vec<UserId>> = HashMap::new();
    for row in member_rows {
        members_by_board
            .entry(row.board_id)
            .or_default()
            .push(UserId::from_uuid(row.user_id));
    }

    rows.into_iter()
        .map(|row| {
            let name = BoardName::new(row.name).map_err(BoardRepositoryError::persistence)?;
            Ok(Board::from_persisted(PersistedBoardData {
                id: BoardId::from_uuid(row.id),
                name,
                description: row.description,
                owner: UserId::from_uuid(row.owner_id),
                members: members_by_board.remove(&row.id).unwrap_or_default(),
                columns: columns_by_board.remove(&row.id).unwrap_or_default(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            }))
        })
        .collect()
}

fn row_to_column(row: BoardColumnRow) -> BoardRepositoryResult<BoardColumn> {
    let key = ColumnKey::try_from(row.column_key.as_str())
        .map_err(BoardRepositoryError::persistence)?;
    Ok(BoardColumn::from_persisted(
        ColumnId::from_uuid(row.id),
        BoardId::from_uuid(row.board_id),
        key,
        row.title,
        row.color,
        row.position,
    ))
}

//! Board aggregate root.

use super::{BoardColumn, BoardDomainError, BoardId, ColumnId, ColumnKey};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_NAME_LENGTH: usize = 50;
const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Validated board name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardName(String);

impl BoardName {
    /// Creates a validated board name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyBoardName`] when the trimmed value is
    /// empty and [`BoardDomainError::BoardNameTooLong`] past 50 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyBoardName);
        }
        let length = trimmed.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(BoardDomainError::BoardNameTooLong {
                max: MAX_NAME_LENGTH,
                actual: length,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named collection of columns and tasks owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    name: BoardName,
    description: Option<String>,
    owner: UserId,
    members: Vec<UserId>,
    columns: Vec<BoardColumn>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted identifier.
    pub id: BoardId,
    /// Persisted name.
    pub name: BoardName,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted members.
    pub members: Vec<UserId>,
    /// Persisted columns in any order.
    pub columns: Vec<BoardColumn>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Creates a board with the three default columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DescriptionTooLong`] past 200 characters.
    pub fn new(
        name: BoardName,
        description: Option<String>,
        owner: UserId,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let description = normalize_description(description)?;
        let id = BoardId::new();
        let columns = ColumnKey::ALL
            .into_iter()
            .zip(0..)
            .map(|(key, position)| BoardColumn::default_for(id, key, position))
            .collect();
        let timestamp = clock.utc();
        Ok(Self {
            id,
            name,
            description,
            owner,
            members: Vec::new(),
            columns,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a board from persisted storage, sorting its columns.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        let mut columns = data.columns;
        columns.sort_by_key(BoardColumn::position);
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            owner: data.owner,
            members: data.members,
            columns,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the board name.
    #[must_use]
    pub const fn name(&self) -> &BoardName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the board members, excluding the owner.
    #[must_use]
    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    /// Returns the columns in board order.
    #[must_use]
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the leftmost column, where new tasks land by default.
    #[must_use]
    pub fn first_column(&self) -> Option<&BoardColumn> {
        self.columns.first()
    }

    /// Resolves a lane key to this board's concrete column.
    #[must_use]
    pub fn column_for(&self, key: ColumnKey) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.key() == key)
    }

    /// Finds a column of this board by identifier.
    #[must_use]
    pub fn column_by_id(&self, id: ColumnId) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.id() == id)
    }

    /// Returns whether `user` owns or is a member of the board.
    #[must_use]
    pub fn is_accessible_by(&self, user: UserId) -> bool {
        self.owner == user || self.members.contains(&user)
    }

    /// Adds a member. Returns `false` when the user already has access.
    pub fn add_member(&mut self, user: UserId, clock: &impl Clock) -> bool {
        if self.is_accessible_by(user) {
            return false;
        }
        self.members.push(user);
        self.updated_at = clock.utc();
        true
    }
}

fn normalize_description(description: Option<String>) -> Result<Option<String>, BoardDomainError> {
    let Some(raw) = description else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let length = trimmed.chars().count();
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(BoardDomainError::DescriptionTooLong {
            max: MAX_DESCRIPTION_LENGTH,
            actual: length,
        });
    }
    Ok(Some(trimmed.to_owned()))
}

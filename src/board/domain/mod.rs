//! Domain model for boards and columns.

mod board;
mod column;
mod error;
mod ids;

pub use board::{Board, BoardName, PersistedBoardData};
pub use column::{BoardColumn, ColumnKey};
pub use error::{BoardDomainError, ParseColumnKeyError};
pub use ids::{BoardId, ColumnId};

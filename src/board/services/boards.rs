//! Board creation, listing and membership.

use crate::board::{
    domain::{Board, BoardDomainError, BoardId, BoardName},
    ports::{BoardRepository, BoardRepositoryError},
};
use crate::user::domain::{Session, Unauthorized, UserId};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBoardRequest {
    name: String,
    description: Option<String>,
}

impl CreateBoardRequest {
    /// Creates a request with the board name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the board description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// The session has no signed-in user.
    #[error(transparent)]
    Unauthorized(#[from] Unauthorized),
    /// The board does not exist or is not visible to the caller.
    #[error("board not found: {0}")]
    NotFound(BoardId),
    /// Only the owner may change membership.
    #[error("only the board owner may manage members of {0}")]
    NotOwner(BoardId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Board orchestration service.
#[derive(Clone)]
pub struct BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a board owned by the session user, with the default columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] for anonymous sessions, invalid input or
    /// repository failures.
    pub async fn create_board(
        &self,
        session: &Session,
        request: CreateBoardRequest,
    ) -> BoardServiceResult<Board> {
        let owner = session.require_user()?;
        let name = BoardName::new(request.name)?;
        let board = Board::new(name, request.description, owner, &*self.clock)?;
        self.repository.store(&board).await?;
        tracing::info!(board_id = %board.id(), owner = %owner, "created board");
        Ok(board)
    }

    /// Lists boards the session user owns or is a member of.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Unauthorized`] for anonymous sessions.
    pub async fn list_boards(&self, session: &Session) -> BoardServiceResult<Vec<Board>> {
        let user = session.require_user()?;
        Ok(self.repository.list_accessible(user).await?)
    }

    /// Returns a board visible to the session user.
    ///
    /// Boards the caller cannot access are reported as not found.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotFound`] when the board is missing or
    /// inaccessible.
    pub async fn get_board(&self, session: &Session, id: BoardId) -> BoardServiceResult<Board> {
        let user = session.require_user()?;
        self.accessible_board(user, id).await
    }

    /// Adds a member to a board owned by the session user.
    ///
    /// Adding an existing member is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotOwner`] when the caller is a member but
    /// not the owner.
    pub async fn add_member(
        &self,
        session: &Session,
        id: BoardId,
        member: UserId,
    ) -> BoardServiceResult<Board> {
        let user = session.require_user()?;
        let mut board = self.accessible_board(user, id).await?;
        if board.owner() != user {
            return Err(BoardServiceError::NotOwner(id));
        }
        if board.add_member(member, &*self.clock) {
            self.repository.update_members(&board).await?;
            tracing::info!(board_id = %id, member = %member, "added board member");
        }
        Ok(board)
    }

    async fn accessible_board(&self, user: UserId, id: BoardId) -> BoardServiceResult<Board> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|board| board.is_accessible_by(user))
            .ok_or(BoardServiceError::NotFound(id))
    }
}

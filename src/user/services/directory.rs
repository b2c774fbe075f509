//! User registration and listing.

use crate::user::{
    domain::{EmailAddress, Session, Unauthorized, User, UserDomainError},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    name: String,
    email: String,
    avatar: Option<String>,
}

impl RegisterUserRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            avatar: None,
        }
    }

    /// Sets the avatar image URL.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// Service-level errors for user directory operations.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// The session has no signed-in user.
    #[error(transparent)]
    Unauthorized(#[from] Unauthorized),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User directory orchestration service.
#[derive(Clone)]
pub struct UserDirectoryService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserDirectoryService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError`] when validation fails or the email is
    /// already registered.
    pub async fn register(&self, request: RegisterUserRequest) -> UserDirectoryResult<User> {
        let RegisterUserRequest {
            name,
            email,
            avatar,
        } = request;
        let mut user = User::new(name, EmailAddress::new(email)?, &*self.clock)?;
        if let Some(url) = avatar {
            user = user.with_avatar(url);
        }
        self.repository.store(&user).await?;
        tracing::info!(user_id = %user.id(), "registered user");
        Ok(user)
    }

    /// Lists every user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Unauthorized`] for anonymous sessions.
    pub async fn list(&self, session: &Session) -> UserDirectoryResult<Vec<User>> {
        session.require_user()?;
        Ok(self.repository.list().await?)
    }
}

//! Resolved request session.

use super::{Unauthorized, UserId};

/// The caller on whose behalf a service operation runs.
///
/// Sessions are produced by whatever authentication layer fronts the crate.
/// An anonymous session may read nothing that is protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    user: Option<UserId>,
}

impl Session {
    /// Session for a signed-in user.
    #[must_use]
    pub const fn authenticated(user: UserId) -> Self {
        Self { user: Some(user) }
    }

    /// Session without a signed-in user.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user: None }
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        self.user
    }

    /// Returns the signed-in user or [`Unauthorized`].
    ///
    /// # Errors
    ///
    /// Returns [`Unauthorized`] for anonymous sessions.
    pub const fn require_user(&self) -> Result<UserId, Unauthorized> {
        match self.user {
            Some(user) => Ok(user),
            None => Err(Unauthorized),
        }
    }
}

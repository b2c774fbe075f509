//! Domain model for users and sessions.

mod error;
mod ids;
mod session;
mod user;

pub use error::{Unauthorized, UserDomainError};
pub use ids::UserId;
pub use session::Session;
pub use user::{EmailAddress, PersistedUserData, User};

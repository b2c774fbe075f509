//! Port for surfacing notices to the user.

use crate::dashboard::domain::Notice;

/// Receives notices raised by dashboard flows.
pub trait Notifier: Send + Sync {
    /// Shows `notice` to the user.
    fn notify(&self, notice: Notice);
}

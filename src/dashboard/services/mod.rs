//! Dashboard orchestration over the gateway port.

mod controller;
mod read_model;
mod sync;

pub use controller::DashboardController;
pub use read_model::BoardReadModel;
pub use sync::{BatchMode, MoveSynchronizer, PendingMove, SyncConfig, SyncOutcome};

//! Port contracts the dashboard depends on.

pub mod gateway;
pub mod notifier;

pub use gateway::{GatewayError, GatewayResult, KanbanGateway};
pub use notifier::Notifier;

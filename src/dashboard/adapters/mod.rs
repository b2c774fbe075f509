//! Adapter implementations for dashboard ports.

pub mod in_process;
pub mod notifier;

pub use in_process::InProcessGateway;
pub use notifier::{RecordingNotifier, TracingNotifier};

//! Pure dashboard state, target resolution and move planning.

mod analytics;
mod drag;
mod filter;
mod notice;
mod reorder;
mod resolver;
mod store;

pub use analytics::BoardAnalytics;
pub use drag::{DragSession, DragTracker};
pub use filter::{DueDateRange, TaskFilter, all_tags};
pub use notice::{Notice, NoticeLevel};
pub use reorder::{MoveCommand, MoveKind, ReorderEngine};
pub use resolver::{ColumnResolver, DropTarget};
pub use store::{OperationId, StoreAction, TaskStore};

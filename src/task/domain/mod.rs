//! Domain model for tasks.
//!
//! Priority is stored as an uppercase code and shown as a lowercase label;
//! [`Priority`] owns both spellings so adapters and views cannot drift apart.

mod attachment;
mod comment;
mod draft;
mod error;
mod ids;
mod placement;
mod priority;
mod task;

pub use attachment::{Attachment, AttachmentDraft};
pub use comment::Comment;
pub use draft::{TaskDraft, TaskTitle, TaskUpdate, normalize_tags};
pub use error::{ParsePriorityError, TaskDomainError};
pub use ids::{AttachmentId, CommentId, TaskId};
pub use placement::{Placement, TaskMove};
pub use priority::Priority;
pub use task::{PersistedTaskData, Task, sort_for_board};

/// Task status is the semantic key of the column holding the task.
pub type TaskStatus = crate::board::domain::ColumnKey;

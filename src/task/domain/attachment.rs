//! File attachments referenced by tasks.

use super::{AttachmentId, TaskDomainError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Metadata describing an uploaded file before it is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDraft {
    /// File name shown to users.
    pub name: String,
    /// Location of the stored file.
    pub url: String,
    /// MIME type reported by the upload.
    pub mime_type: String,
    /// File size in bytes.
    pub size_bytes: u64,
}

/// A file attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    id: AttachmentId,
    task_id: TaskId,
    name: String,
    url: String,
    mime_type: String,
    size_bytes: u64,
    created_at: DateTime<Utc>,
}

impl Attachment {
    /// Creates an attachment record from upload metadata.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyAttachmentField`] when the name or URL
    /// is blank.
    pub fn new(
        task_id: TaskId,
        draft: AttachmentDraft,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(TaskDomainError::EmptyAttachmentField("name"));
        }
        let url = draft.url.trim();
        if url.is_empty() {
            return Err(TaskDomainError::EmptyAttachmentField("url"));
        }
        Ok(Self {
            id: AttachmentId::new(),
            task_id,
            name: name.to_owned(),
            url: url.to_owned(),
            mime_type: draft.mime_type,
            size_bytes: draft.size_bytes,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs an attachment from persisted fields.
    #[must_use]
    pub fn from_persisted(
        id: AttachmentId,
        task_id: TaskId,
        draft: AttachmentDraft,
        created_at: DateTime<Utc>,
    ) -> Self {
        let AttachmentDraft {
            name,
            url,
            mime_type,
            size_bytes,
        } = draft;
        Self {
            id,
            task_id,
            name,
            url,
            mime_type,
            size_bytes,
            created_at,
        }
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the file location.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the size in bytes.
    #[must_use]
    pub const fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::soft_delete::SoftDeletable;

// Attachment models
#[derive(Queryable, Selectable, Identifiable, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::attachments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Attachment {
    pub id: Uuid,
    pub task_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub content: Vec<u8>,
    pub size_bytes: i64,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl SoftDeletable for Attachment {
    fn is_removed(&self) -> bool {
        self.is_deleted
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::attachments)]
pub struct NewAttachment {
    pub task_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub content: Vec<u8>,
    pub size_bytes: i64,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::attachments)]
pub struct AttachmentChanges {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl AttachmentChanges {
    pub fn is_empty(&self) -> bool {
        self.file_name.is_none() && self.content_type.is_none()
    }
}

/// Attachment metadata without the file body.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AttachmentInfo {
    pub id: Uuid,
    pub task_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Attachment> for AttachmentInfo {
    fn from(attachment: &Attachment) -> Self {
        Self {
            id: attachment.id,
            task_id: attachment.task_id,
            file_name: attachment.file_name.clone(),
            content_type: attachment.content_type.clone(),
            size_bytes: attachment.size_bytes,
            is_deleted: attachment.is_deleted,
            created_at: attachment.created_at,
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct CreateAttachmentRequest {
    pub task_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "File name must be between 1 and 255 characters"))]
    pub file_name: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[validate(length(min = 1, message = "File content is required"))]
    pub content_base64: String,
}

/// Metadata only; the stored body is immutable.
#[derive(Deserialize, Validate, Default)]
pub struct UpdateAttachmentRequest {
    #[validate(length(min = 1, max = 255, message = "File name must be between 1 and 255 characters"))]
    pub file_name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Content type cannot be empty"))]
    pub content_type: Option<String>,
}

impl From<&UpdateAttachmentRequest> for AttachmentChanges {
    fn from(req: &UpdateAttachmentRequest) -> Self {
        Self {
            file_name: req.file_name.as_ref().map(|name| name.trim().to_string()),
            content_type: req.content_type.clone(),
        }
    }
}

fn default_content_type() -> String {
    "application/octet-stream".to_string()
}

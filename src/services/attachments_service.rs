use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::attachment::{
        Attachment, AttachmentChanges, AttachmentInfo, CreateAttachmentRequest, NewAttachment,
        UpdateAttachmentRequest,
    },
    db::repositories::AttachmentRepo,
    db::soft_delete::{Visibility, require_active},
    error::AppError,
    services::context::RequestContext,
    services::scope,
    validation::attachment::decode_content,
};

pub struct AttachmentsService;

impl AttachmentsService {
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateAttachmentRequest,
        max_bytes: usize,
    ) -> Result<AttachmentInfo, AppError> {
        let content = decode_content(&req.content_base64, max_bytes)?;
        let task = scope::require_task_access(conn, ctx, req.task_id)?;

        let attachment = AttachmentRepo::insert(
            conn,
            &NewAttachment {
                task_id: task.id,
                file_name: req.file_name.trim().to_string(),
                content_type: req.content_type.clone(),
                size_bytes: content.len() as i64,
                content,
            },
        )?;

        tracing::info!(attachment_id = %attachment.id, task_id = %task.id, size = attachment.size_bytes, "Attachment uploaded");
        Ok(AttachmentInfo::from(&attachment))
    }

    pub fn list_by_task(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: Uuid,
    ) -> Result<Vec<AttachmentInfo>, AppError> {
        let task = scope::require_task_access(conn, ctx, task_id)?;
        Ok(AttachmentRepo::list_by_task(conn, task.id, Visibility::Active)?
            .iter()
            .map(AttachmentInfo::from)
            .collect())
    }

    /// Full row, including the file body.
    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        attachment_id: Uuid,
    ) -> Result<Attachment, AppError> {
        let attachment =
            require_active(AttachmentRepo::find_by_id(conn, attachment_id)?, "Attachment")?;
        scope::require_task_access(conn, ctx, attachment.task_id)?;
        Ok(attachment)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        attachment_id: Uuid,
        req: &UpdateAttachmentRequest,
    ) -> Result<AttachmentInfo, AppError> {
        let attachment = Self::get(conn, ctx, attachment_id)?;

        let changes = AttachmentChanges::from(req);
        if changes.file_name.as_deref().is_some_and(str::is_empty) {
            return Err(AppError::field("file_name", "File name cannot be blank"));
        }
        if changes.is_empty() {
            return Ok(AttachmentInfo::from(&attachment));
        }

        let updated = AttachmentRepo::update(conn, attachment.id, &changes)?;
        tracing::info!(attachment_id = %updated.id, "Attachment updated");
        Ok(AttachmentInfo::from(&updated))
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        attachment_id: Uuid,
    ) -> Result<(), AppError> {
        let attachment = Self::get(conn, ctx, attachment_id)?;

        AttachmentRepo::soft_delete(conn, attachment.id)?;
        tracing::info!(attachment_id = %attachment.id, "Attachment deleted");
        Ok(())
    }
}

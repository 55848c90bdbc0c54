use diesel::prelude::*;

use crate::db::models::attachment::{Attachment, AttachmentChanges, NewAttachment};
use crate::db::soft_delete::Visibility;

pub struct AttachmentRepo;

impl AttachmentRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        attachment_id: uuid::Uuid,
    ) -> Result<Option<Attachment>, diesel::result::Error> {
        use crate::schema::attachments::dsl::*;
        attachments
            .filter(id.eq(attachment_id))
            .select(Attachment::as_select())
            .first(conn)
            .optional()
    }

    pub fn list_by_task(
        conn: &mut PgConnection,
        target_task_id: uuid::Uuid,
        visibility: Visibility,
    ) -> Result<Vec<Attachment>, diesel::result::Error> {
        use crate::schema::attachments::dsl::*;
        attachments
            .filter(task_id.eq(target_task_id))
            .filter(is_deleted.eq(visibility.is_deleted()))
            .order(created_at.asc())
            .select(Attachment::as_select())
            .load(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_attachment: &NewAttachment,
    ) -> Result<Attachment, diesel::result::Error> {
        diesel::insert_into(crate::schema::attachments::table)
            .values(new_attachment)
            .returning(Attachment::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        attachment_id: uuid::Uuid,
        changes: &AttachmentChanges,
    ) -> Result<Attachment, diesel::result::Error> {
        use crate::schema::attachments::dsl::*;
        diesel::update(attachments.filter(id.eq(attachment_id)))
            .set(changes)
            .returning(Attachment::as_returning())
            .get_result(conn)
    }

    pub fn soft_delete(
        conn: &mut PgConnection,
        attachment_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::attachments::dsl::*;
        diesel::update(attachments.filter(id.eq(attachment_id)))
            .set(is_deleted.eq(true))
            .execute(conn)
    }
}

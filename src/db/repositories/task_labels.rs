use diesel::prelude::*;

use crate::db::models::label::{NewTaskLabel, TaskLabel};

pub struct TaskLabelRepo;

impl TaskLabelRepo {
    pub fn find_active(
        conn: &mut PgConnection,
        target_task_id: uuid::Uuid,
        target_label_id: uuid::Uuid,
    ) -> Result<Option<TaskLabel>, diesel::result::Error> {
        use crate::schema::task_labels::dsl::*;
        task_labels
            .filter(task_id.eq(target_task_id))
            .filter(label_id.eq(target_label_id))
            .filter(is_deleted.eq(false))
            .select(TaskLabel::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_link: &NewTaskLabel,
    ) -> Result<TaskLabel, diesel::result::Error> {
        diesel::insert_into(crate::schema::task_labels::table)
            .values(new_link)
            .returning(TaskLabel::as_returning())
            .get_result(conn)
    }

    pub fn soft_delete(
        conn: &mut PgConnection,
        link_id: uuid::Uuid,
    ) -> Result<TaskLabel, diesel::result::Error> {
        use crate::schema::task_labels::dsl::*;
        diesel::update(task_labels.filter(id.eq(link_id)))
            .set(is_deleted.eq(true))
            .returning(TaskLabel::as_returning())
            .get_result(conn)
    }
}

use diesel::prelude::*;

use crate::db::models::work_time::{NewWorkTime, WorkTime};
use crate::db::soft_delete::Visibility;

pub struct WorkTimeRepo;

impl WorkTimeRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        work_time_id: uuid::Uuid,
    ) -> Result<Option<WorkTime>, diesel::result::Error> {
        use crate::schema::work_times::dsl::*;
        work_times
            .filter(id.eq(work_time_id))
            .select(WorkTime::as_select())
            .first(conn)
            .optional()
    }

    pub fn list_by_task(
        conn: &mut PgConnection,
        target_task_id: uuid::Uuid,
        visibility: Visibility,
    ) -> Result<Vec<WorkTime>, diesel::result::Error> {
        use crate::schema::work_times::dsl::*;
        work_times
            .filter(task_id.eq(target_task_id))
            .filter(is_deleted.eq(visibility.is_deleted()))
            .order(started_at.asc())
            .select(WorkTime::as_select())
            .load(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_work_time: &NewWorkTime,
    ) -> Result<WorkTime, diesel::result::Error> {
        diesel::insert_into(crate::schema::work_times::table)
            .values(new_work_time)
            .returning(WorkTime::as_returning())
            .get_result(conn)
    }

    /// Closes an open interval. Returns `None` when the row was already
    /// closed, so a concurrent completion never overwrites `ended_at`.
    pub fn complete(
        conn: &mut PgConnection,
        work_time_id: uuid::Uuid,
        end: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<WorkTime>, diesel::result::Error> {
        use crate::schema::work_times::dsl::*;
        diesel::update(
            work_times
                .filter(id.eq(work_time_id))
                .filter(ended_at.is_null()),
        )
        .set(ended_at.eq(Some(end)))
        .returning(WorkTime::as_returning())
        .get_result(conn)
        .optional()
    }

    pub fn soft_delete(
        conn: &mut PgConnection,
        work_time_id: uuid::Uuid,
    ) -> Result<WorkTime, diesel::result::Error> {
        use crate::schema::work_times::dsl::*;
        diesel::update(work_times.filter(id.eq(work_time_id)))
            .set(is_deleted.eq(true))
            .returning(WorkTime::as_returning())
            .get_result(conn)
    }
}

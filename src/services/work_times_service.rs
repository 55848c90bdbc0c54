use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::work_time::{NewWorkTime, WorkTime},
    db::repositories::WorkTimeRepo,
    db::soft_delete::{Visibility, require_active},
    error::AppError,
    services::context::RequestContext,
    services::scope,
    validation::work_time::validate_completion,
};

pub struct WorkTimesService;

impl WorkTimesService {
    /// Opens an interval; several may be open on one task at once.
    pub fn start(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: Uuid,
        started_at: Option<DateTime<Utc>>,
    ) -> Result<WorkTime, AppError> {
        let task = scope::require_task_access(conn, ctx, task_id)?;

        let work_time = WorkTimeRepo::insert(
            conn,
            &NewWorkTime {
                task_id: task.id,
                started_at: started_at.unwrap_or_else(Utc::now),
                ended_at: None,
            },
        )?;

        tracing::info!(work_time_id = %work_time.id, task_id = %task.id, "Work time started");
        Ok(work_time)
    }

    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        work_time_id: Uuid,
    ) -> Result<WorkTime, AppError> {
        let work_time = require_active(WorkTimeRepo::find_by_id(conn, work_time_id)?, "Work time")?;
        scope::require_task_access(conn, ctx, work_time.task_id)?;
        Ok(work_time)
    }

    pub fn list_by_task(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: Uuid,
    ) -> Result<Vec<WorkTime>, AppError> {
        let task = scope::require_task_access(conn, ctx, task_id)?;
        Ok(WorkTimeRepo::list_by_task(conn, task.id, Visibility::Active)?)
    }

    /// Closes an open interval. A closed one is rejected and left untouched.
    pub fn complete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        work_time_id: Uuid,
        ended_at: Option<DateTime<Utc>>,
    ) -> Result<WorkTime, AppError> {
        let work_time = Self::get(conn, ctx, work_time_id)?;
        let end = ended_at.unwrap_or_else(Utc::now);
        validate_completion(&work_time, end)?;

        let completed = WorkTimeRepo::complete(conn, work_time.id, end)?
            .ok_or_else(|| AppError::field("ended_at", "Work time is already completed"))?;

        tracing::info!(work_time_id = %completed.id, "Work time completed");
        Ok(completed)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        work_time_id: Uuid,
    ) -> Result<(), AppError> {
        let work_time = Self::get(conn, ctx, work_time_id)?;

        WorkTimeRepo::soft_delete(conn, work_time.id)?;
        tracing::info!(work_time_id = %work_time.id, "Work time deleted");
        Ok(())
    }
}

use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::TaskStatus,
    db::models::sprint::{CreateSprintRequest, NewSprint, Sprint, SprintChanges, UpdateSprintRequest},
    db::models::task::Task,
    db::repositories::{ProjectRepo, SprintRepo, TaskRepo},
    db::soft_delete::{Visibility, require_active},
    error::AppError,
    permissions::can_create_sprint,
    services::context::RequestContext,
    services::projects_service::ProjectsService,
    services::scope,
    validation::schedule::validate_window,
};

pub struct SprintsService;

impl SprintsService {
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateSprintRequest,
    ) -> Result<Sprint, AppError> {
        let project = require_active(ProjectRepo::find_by_id(conn, req.project_id)?, "Project")?;
        let team = ProjectsService::project_team(conn, &project)?;

        if !can_create_sprint(&project, team.as_ref(), ctx.user_id) {
            return Err(AppError::forbidden(
                "Only the project owner can create sprints",
            ));
        }

        let started_at = req.started_at.unwrap_or_else(Utc::now);
        validate_window(started_at, req.ended_at, "ended_at")?;

        let sprint = SprintRepo::insert(
            conn,
            &NewSprint {
                project_id: project.id,
                started_at,
                ended_at: req.ended_at,
            },
        )?;

        tracing::info!(sprint_id = %sprint.id, project_id = %project.id, "Sprint created");
        Ok(sprint)
    }

    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        sprint_id: Uuid,
    ) -> Result<Sprint, AppError> {
        let sprint = require_active(SprintRepo::find_by_id(conn, sprint_id)?, "Sprint")?;
        let team_id = SprintRepo::owning_team_id(conn, sprint.id)?
            .ok_or_else(|| AppError::not_found("Team"))?;
        scope::require_team_view(conn, ctx, team_id)?;
        Ok(sprint)
    }

    pub fn list_archived(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<Vec<Sprint>, AppError> {
        let team_ids = scope::archive_team_ids(conn, ctx)?;
        Ok(SprintRepo::list(conn, Visibility::Archived, team_ids)?)
    }

    fn require_manager(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        sprint_id: Uuid,
    ) -> Result<Sprint, AppError> {
        let sprint = require_active(SprintRepo::find_by_id(conn, sprint_id)?, "Sprint")?;
        let project = ProjectRepo::find_by_id(conn, sprint.project_id)?
            .ok_or_else(|| AppError::not_found("Project"))?;
        let team = ProjectsService::project_team(conn, &project)?;

        if !can_create_sprint(&project, team.as_ref(), ctx.user_id) {
            return Err(AppError::forbidden(
                "Only the project owner can modify this sprint",
            ));
        }
        Ok(sprint)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        sprint_id: Uuid,
        req: &UpdateSprintRequest,
    ) -> Result<Sprint, AppError> {
        let sprint = Self::require_manager(conn, ctx, sprint_id)?;

        let changes = SprintChanges {
            started_at: req.started_at,
            ended_at: req.ended_at,
        };
        if changes.is_empty() {
            return Ok(sprint);
        }

        validate_window(
            req.started_at.unwrap_or(sprint.started_at),
            req.ended_at.unwrap_or(sprint.ended_at),
            "ended_at",
        )?;

        let updated = SprintRepo::update(conn, sprint.id, &changes)?;
        tracing::info!(sprint_id = %updated.id, "Sprint updated");
        Ok(updated)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        sprint_id: Uuid,
    ) -> Result<(), AppError> {
        let sprint = Self::require_manager(conn, ctx, sprint_id)?;

        SprintRepo::soft_delete(conn, sprint.id)?;
        tracing::info!(sprint_id = %sprint.id, "Sprint deleted");
        Ok(())
    }

    pub fn list_tasks(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        sprint_id: Uuid,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>, AppError> {
        let sprint = Self::get(conn, ctx, sprint_id)?;
        Ok(TaskRepo::list_by_sprint(conn, sprint.id, Visibility::Active, status)?)
    }
}

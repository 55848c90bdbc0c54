use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::SprintState,
    db::models::project::{
        CreateProjectRequest, NewProject, Project, ProjectChanges, UpdateProjectRequest,
    },
    db::models::sprint::Sprint,
    db::models::team::Team,
    db::repositories::{ProjectRepo, SprintRepo, TeamRepo, WorkspaceRepo},
    db::soft_delete::{Visibility, require_active},
    error::AppError,
    permissions::{can_manage_project, is_workspace_owner},
    services::context::RequestContext,
    services::scope,
    validation::schedule::{validate_title, validate_window},
};

pub struct ProjectsService;

impl ProjectsService {
    /// Records the workspace's team and the actor as direct owner.
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateProjectRequest,
    ) -> Result<Project, AppError> {
        validate_title(&req.title)?;

        let workspace =
            require_active(WorkspaceRepo::find_by_id(conn, req.workspace_id)?, "Workspace")?;
        let team = scope::load_team(conn, workspace.team_id)?;

        if !is_workspace_owner(&workspace, &team, ctx.user_id) {
            return Err(AppError::forbidden(
                "Only the workspace owner can create projects",
            ));
        }

        let started_at = req.started_at.unwrap_or_else(Utc::now);
        validate_window(started_at, req.ended_at, "ended_at")?;
        validate_window(started_at, req.deadline, "deadline")?;

        let project = ProjectRepo::insert(
            conn,
            &NewProject {
                workspace_id: workspace.id,
                team_id: Some(workspace.team_id),
                owner_id: Some(ctx.user_id),
                title: req.title.trim().to_string(),
                description: req.description.clone(),
                started_at,
                ended_at: req.ended_at,
                deadline: req.deadline,
            },
        )?;

        tracing::info!(project_id = %project.id, workspace_id = %workspace.id, "Project created");
        Ok(project)
    }

    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> Result<Project, AppError> {
        let project = require_active(ProjectRepo::find_by_id(conn, project_id)?, "Project")?;
        let workspace = WorkspaceRepo::find_by_id(conn, project.workspace_id)?
            .ok_or_else(|| AppError::not_found("Workspace"))?;
        scope::require_team_view(conn, ctx, workspace.team_id)?;
        Ok(project)
    }

    pub fn list(conn: &mut PgConnection, ctx: &RequestContext) -> Result<Vec<Project>, AppError> {
        let team_ids = scope::visible_team_ids(conn, ctx)?;
        Ok(ProjectRepo::list(conn, Visibility::Active, team_ids)?)
    }

    pub fn list_archived(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<Vec<Project>, AppError> {
        let team_ids = scope::archive_team_ids(conn, ctx)?;
        Ok(ProjectRepo::list(conn, Visibility::Archived, team_ids)?)
    }

    /// Team of a project, if it still has one.
    pub fn project_team(
        conn: &mut PgConnection,
        project: &Project,
    ) -> Result<Option<Team>, AppError> {
        match project.team_id {
            Some(team_id) => Ok(TeamRepo::find_by_id(conn, team_id)?),
            None => Ok(None),
        }
    }

    fn require_manager(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> Result<Project, AppError> {
        let project = require_active(ProjectRepo::find_by_id(conn, project_id)?, "Project")?;
        let team = Self::project_team(conn, &project)?;

        if !can_manage_project(&project, team.as_ref(), ctx.user_id) {
            return Err(AppError::forbidden(
                "Only the project owner can modify this project",
            ));
        }
        Ok(project)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
        req: &UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        let project = Self::require_manager(conn, ctx, project_id)?;

        if let Some(ref title) = req.title {
            validate_title(title)?;
        }
        if let Some(ended_at) = req.ended_at {
            validate_window(project.started_at, ended_at, "ended_at")?;
        }
        if let Some(deadline) = req.deadline {
            validate_window(project.started_at, deadline, "deadline")?;
        }

        let changes = ProjectChanges::from(req);
        if changes.is_empty() {
            return Ok(project);
        }

        let updated = ProjectRepo::update(conn, project.id, &changes)?;
        tracing::info!(project_id = %updated.id, "Project updated");
        Ok(updated)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> Result<(), AppError> {
        let project = Self::require_manager(conn, ctx, project_id)?;

        ProjectRepo::soft_delete(conn, project.id)?;
        tracing::info!(project_id = %project.id, "Project deleted");
        Ok(())
    }

    pub fn list_sprints(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
        state: Option<SprintState>,
    ) -> Result<Vec<Sprint>, AppError> {
        let project = Self::get(conn, ctx, project_id)?;
        Ok(SprintRepo::list_by_project(conn, project.id, state, Utc::now())?)
    }
}

use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::workspace::{
        CreateWorkspaceRequest, NewWorkspace, UpdateWorkspaceRequest, Workspace, WorkspaceSummary,
    },
    db::repositories::{ProjectRepo, TeamMemberRepo, TeamRepo, WorkspaceRepo},
    db::soft_delete::{Visibility, require_active},
    error::AppError,
    permissions::{is_member, is_owner, is_workspace_owner},
    services::context::RequestContext,
    services::scope,
    validation::schedule::validate_title,
};

pub struct WorkspacesService;

impl WorkspacesService {
    /// The actor must both belong to and own the team.
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateWorkspaceRequest,
    ) -> Result<Workspace, AppError> {
        validate_title(&req.title)?;

        let team = require_active(
            TeamRepo::find_by_id(conn, req.team_id)?,
            "Team",
        )?;
        let memberships = TeamMemberRepo::list_by_team(conn, team.id)?;

        if !is_member(&team, ctx.user_id, &memberships) || !is_owner(&team, ctx.user_id) {
            return Err(AppError::forbidden(
                "Only the team owner can create workspaces",
            ));
        }

        let workspace = WorkspaceRepo::insert(
            conn,
            &NewWorkspace {
                team_id: team.id,
                title: req.title.trim().to_string(),
            },
        )?;

        tracing::info!(workspace_id = %workspace.id, team_id = %team.id, "Workspace created");
        Ok(workspace)
    }

    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        workspace_id: Uuid,
    ) -> Result<Workspace, AppError> {
        let workspace = require_active(WorkspaceRepo::find_by_id(conn, workspace_id)?, "Workspace")?;
        scope::require_team_view(conn, ctx, workspace.team_id)?;
        Ok(workspace)
    }

    pub fn list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<Vec<Workspace>, AppError> {
        let team_ids = scope::visible_team_ids(conn, ctx)?;
        Ok(WorkspaceRepo::list(conn, Visibility::Active, team_ids)?)
    }

    pub fn list_archived(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<Vec<Workspace>, AppError> {
        let team_ids = scope::archive_team_ids(conn, ctx)?;
        Ok(WorkspaceRepo::list(conn, Visibility::Archived, team_ids)?)
    }

    fn require_owner(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        workspace_id: Uuid,
    ) -> Result<Workspace, AppError> {
        let workspace = require_active(WorkspaceRepo::find_by_id(conn, workspace_id)?, "Workspace")?;
        let team = scope::load_team(conn, workspace.team_id)?;

        if !is_workspace_owner(&workspace, &team, ctx.user_id) {
            return Err(AppError::forbidden(
                "Only the team owner can modify this workspace",
            ));
        }
        Ok(workspace)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        workspace_id: Uuid,
        req: &UpdateWorkspaceRequest,
    ) -> Result<Workspace, AppError> {
        validate_title(&req.title)?;
        let workspace = Self::require_owner(conn, ctx, workspace_id)?;

        let updated = WorkspaceRepo::update_title(conn, workspace.id, req.title.trim())?;
        tracing::info!(workspace_id = %updated.id, "Workspace updated");
        Ok(updated)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        workspace_id: Uuid,
    ) -> Result<(), AppError> {
        let workspace = Self::require_owner(conn, ctx, workspace_id)?;

        WorkspaceRepo::soft_delete(conn, workspace.id)?;
        tracing::info!(workspace_id = %workspace.id, "Workspace deleted");
        Ok(())
    }

    /// Title, team name and the titles of the workspace's active projects.
    pub fn summary(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        workspace_id: Uuid,
    ) -> Result<WorkspaceSummary, AppError> {
        let workspace = Self::get(conn, ctx, workspace_id)?;
        let team = scope::load_team(conn, workspace.team_id)?;
        let projects = ProjectRepo::list_active_titles_by_workspace(conn, workspace.id)?;

        Ok(WorkspaceSummary {
            id: workspace.id,
            title: workspace.title,
            team: team.name,
            projects,
        })
    }
}

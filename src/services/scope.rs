//! Team-scoped access shared by the hierarchy and task services.

use diesel::PgConnection;
use uuid::Uuid;

use crate::db::models::{Task, Team};
use crate::db::repositories::{TaskRepo, TeamMemberRepo, TeamRepo};
use crate::db::soft_delete::require_active;
use crate::error::AppError;
use crate::permissions::{can_view_team, is_owner};
use crate::services::context::RequestContext;

/// Team ids whose rows the actor may list; `None` means unrestricted.
pub fn visible_team_ids(
    conn: &mut PgConnection,
    ctx: &RequestContext,
) -> Result<Option<Vec<Uuid>>, AppError> {
    if ctx.is_elevated() {
        return Ok(None);
    }

    let mut ids = TeamRepo::list_owned_ids(conn, ctx.user_id)?;
    for team_id in TeamMemberRepo::list_team_ids_for_user(conn, ctx.user_id)? {
        if !ids.contains(&team_id) {
            ids.push(team_id);
        }
    }
    Ok(Some(ids))
}

/// Team ids whose archived rows the actor may list.
pub fn archive_team_ids(
    conn: &mut PgConnection,
    ctx: &RequestContext,
) -> Result<Option<Vec<Uuid>>, AppError> {
    if ctx.is_elevated() {
        return Ok(None);
    }
    Ok(Some(TeamRepo::list_owned_ids(conn, ctx.user_id)?))
}

pub fn load_team(conn: &mut PgConnection, team_id: Uuid) -> Result<Team, AppError> {
    TeamRepo::find_by_id(conn, team_id)?.ok_or_else(|| AppError::not_found("Team"))
}

/// Loads the team and checks the actor is elevated, its owner or a member.
pub fn require_team_view(
    conn: &mut PgConnection,
    ctx: &RequestContext,
    team_id: Uuid,
) -> Result<Team, AppError> {
    let team = load_team(conn, team_id)?;
    let memberships = TeamMemberRepo::list_by_team(conn, team.id)?;

    if !can_view_team(ctx, &team, &memberships) {
        return Err(AppError::forbidden("You are not a member of this team"));
    }
    Ok(team)
}

pub fn require_team_owner(
    conn: &mut PgConnection,
    ctx: &RequestContext,
    team_id: Uuid,
) -> Result<Team, AppError> {
    let team = load_team(conn, team_id)?;
    if !is_owner(&team, ctx.user_id) {
        return Err(AppError::forbidden("Only the team owner can do that"));
    }
    Ok(team)
}

/// Active task the actor may reach through its owning team.
pub fn require_task_access(
    conn: &mut PgConnection,
    ctx: &RequestContext,
    task_id: Uuid,
) -> Result<Task, AppError> {
    let task = require_active(TaskRepo::find_by_id(conn, task_id)?, "Task")?;
    let team_id = TaskRepo::owning_team_id(conn, task.id)?
        .ok_or_else(|| AppError::not_found("Team"))?;
    require_team_view(conn, ctx, team_id)?;
    Ok(task)
}

use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::auth::UserBasicInfo,
    db::models::team::{NewTeamMember, TeamMember, TeamMemberInfo},
    db::repositories::{TeamMemberRepo, TeamRepo, UserRepo},
    db::soft_delete::require_active,
    error::AppError,
    permissions::is_owner,
    services::context::RequestContext,
    services::scope,
};

pub struct TeamMembersService;

impl TeamMembersService {
    pub fn list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        team_id: Uuid,
    ) -> Result<Vec<TeamMemberInfo>, AppError> {
        require_active(TeamRepo::find_by_id(conn, team_id)?, "Team")?;
        scope::require_team_view(conn, ctx, team_id)?;

        Ok(TeamMemberRepo::list_with_users(conn, team_id)?
            .into_iter()
            .map(|(member, user)| TeamMemberInfo {
                user: UserBasicInfo::from(&user),
                is_owner: member.is_owner,
                joined_at: member.joined_at,
            })
            .collect())
    }

    pub fn add(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<TeamMember, AppError> {
        require_active(TeamRepo::find_by_id(conn, team_id)?, "Team")?;
        scope::require_team_owner(conn, ctx, team_id)?;

        require_active(UserRepo::find_by_id(conn, user_id)?, "User")?;

        if TeamMemberRepo::exists(conn, team_id, user_id)? {
            return Err(AppError::field("user_id", "User is already a member of this team"));
        }

        let member = TeamMemberRepo::insert(
            conn,
            &NewTeamMember {
                user_id,
                team_id,
                is_owner: false,
            },
        )
        .map_err(|e| {
            AppError::unique_violation(e, "user_id", "User is already a member of this team")
        })?;

        tracing::info!(team_id = %team_id, user_id = %user_id, "Team member added");
        Ok(member)
    }

    /// The owner may remove anyone but themselves; a member may leave.
    pub fn remove(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        let team = require_active(TeamRepo::find_by_id(conn, team_id)?, "Team")?;

        let acting_owner = is_owner(&team, ctx.user_id);
        if !acting_owner && ctx.user_id != user_id {
            return Err(AppError::forbidden("Only the team owner can remove members"));
        }

        if is_owner(&team, user_id) {
            return Err(AppError::validation(
                "The team owner cannot leave; transfer ownership first",
            ));
        }

        if TeamMemberRepo::delete(conn, team_id, user_id)? == 0 {
            return Err(AppError::not_found("Team member"));
        }

        tracing::info!(team_id = %team_id, user_id = %user_id, "Team member removed");
        Ok(())
    }
}

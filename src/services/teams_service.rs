use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::auth::UserBasicInfo,
    db::models::team::{
        CreateTeamRequest, NewTeam, NewTeamMember, Team, TeamChanges, TeamDetailResponse,
        TeamMemberInfo, UpdateTeamRequest,
    },
    db::repositories::{TeamMemberRepo, TeamRepo},
    db::soft_delete::{Visibility, require_active},
    error::AppError,
    services::context::RequestContext,
    services::scope,
};

pub struct TeamsService;

impl TeamsService {
    pub fn validate_name(name: &str) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::field("name", "Team name is required"));
        }
        Ok(())
    }

    /// Creates the team and the creator's owner membership in one transaction.
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateTeamRequest,
    ) -> Result<Team, AppError> {
        Self::validate_name(&req.name)?;

        if TeamRepo::exists_by_name(conn, &req.name, None)? {
            return Err(AppError::field("name", "Team with this name already exists"));
        }

        let user_id = ctx.user_id;
        let team = conn
            .transaction::<Team, diesel::result::Error, _>(|conn| {
                let team = TeamRepo::insert(
                    conn,
                    &NewTeam {
                        name: req.name.trim().to_string(),
                        description: req.description.clone(),
                        owner_id: Some(user_id),
                    },
                )?;

                TeamMemberRepo::insert(
                    conn,
                    &NewTeamMember {
                        user_id,
                        team_id: team.id,
                        is_owner: true,
                    },
                )?;

                Ok(team)
            })
            .map_err(|e| AppError::unique_violation(e, "name", "Team with this name already exists"))?;

        tracing::info!(team_id = %team.id, owner_id = %user_id, "Team created");
        Ok(team)
    }

    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        team_id: Uuid,
    ) -> Result<TeamDetailResponse, AppError> {
        let team = require_active(TeamRepo::find_by_id(conn, team_id)?, "Team")?;
        scope::require_team_view(conn, ctx, team.id)?;

        let members = TeamMemberRepo::list_with_users(conn, team.id)?
            .into_iter()
            .map(|(member, user)| TeamMemberInfo {
                user: UserBasicInfo::from(&user),
                is_owner: member.is_owner,
                joined_at: member.joined_at,
            })
            .collect();

        Ok(TeamDetailResponse {
            id: team.id,
            name: team.name,
            description: team.description,
            owner_id: team.owner_id,
            members,
            created_at: team.created_at,
            updated_at: team.updated_at,
        })
    }

    pub fn list(conn: &mut PgConnection, ctx: &RequestContext) -> Result<Vec<Team>, AppError> {
        let team_ids = scope::visible_team_ids(conn, ctx)?;
        Ok(TeamRepo::list(conn, Visibility::Active, team_ids)?)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        team_id: Uuid,
        req: &UpdateTeamRequest,
    ) -> Result<Team, AppError> {
        let existing = require_active(TeamRepo::find_by_id(conn, team_id)?, "Team")?;
        scope::require_team_owner(conn, ctx, existing.id)?;

        if req.name.is_none() && req.description.is_none() && req.owner_id.is_none() {
            return Ok(existing);
        }

        if let Some(ref name) = req.name {
            Self::validate_name(name)?;
            if TeamRepo::exists_by_name(conn, name, Some(team_id))? {
                return Err(AppError::field("name", "Team with this name already exists"));
            }
        }

        let new_owner = match req.owner_id {
            Some(owner_id) if existing.owner_id != Some(owner_id) => {
                if !TeamMemberRepo::exists(conn, team_id, owner_id)? {
                    return Err(AppError::field(
                        "owner_id",
                        "New owner must be a member of the team",
                    ));
                }
                Some(owner_id)
            }
            _ => None,
        };

        let changes = TeamChanges {
            name: req.name.as_ref().map(|n| n.trim().to_string()),
            description: req.description.clone(),
            owner_id: new_owner.map(Some),
        };

        if changes.name.is_none() && changes.description.is_none() && changes.owner_id.is_none() {
            return Ok(existing);
        }

        let previous_owner = existing.owner_id;
        let team = conn
            .transaction::<Team, diesel::result::Error, _>(|conn| {
                if let Some(owner_id) = new_owner {
                    if let Some(previous) = previous_owner {
                        TeamMemberRepo::set_owner_flag(conn, team_id, previous, false)?;
                    }
                    TeamMemberRepo::set_owner_flag(conn, team_id, owner_id, true)?;
                }
                TeamRepo::update(conn, team_id, &changes)
            })
            .map_err(|e| AppError::unique_violation(e, "name", "Team with this name already exists"))?;

        tracing::info!(team_id = %team.id, "Team updated");
        Ok(team)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        team_id: Uuid,
    ) -> Result<(), AppError> {
        let team = require_active(TeamRepo::find_by_id(conn, team_id)?, "Team")?;
        scope::require_team_owner(conn, ctx, team.id)?;

        TeamRepo::soft_delete(conn, team.id)?;
        tracing::info!(team_id = %team.id, "Team deleted");
        Ok(())
    }
}

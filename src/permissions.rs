//! Ownership and membership predicates.
//!
//! Plain functions over loaded rows; services call them before mutating and
//! turn a `false` into [`AppError::Forbidden`](crate::error::AppError).

use uuid::Uuid;

use crate::db::models::{Project, Team, TeamMember, Workspace};
use crate::services::context::RequestContext;

pub fn is_member(team: &Team, user_id: Uuid, memberships: &[TeamMember]) -> bool {
    memberships
        .iter()
        .any(|m| m.team_id == team.id && m.user_id == user_id)
}

pub fn is_owner(team: &Team, user_id: Uuid) -> bool {
    team.owner_id == Some(user_id)
}

pub fn is_workspace_owner(workspace: &Workspace, team: &Team, user_id: Uuid) -> bool {
    workspace.team_id == team.id && is_owner(team, user_id)
}

pub fn is_project_owner(project: &Project, team: &Team, user_id: Uuid) -> bool {
    project.team_id == Some(team.id) && is_owner(team, user_id)
}

/// Team owner when the project still has a team, otherwise the user recorded
/// as the project's direct owner.
pub fn can_manage_project(project: &Project, project_team: Option<&Team>, user_id: Uuid) -> bool {
    match (project.team_id, project_team) {
        (Some(_), Some(team)) => is_project_owner(project, team, user_id),
        _ => project.owner_id == Some(user_id),
    }
}

pub fn can_create_sprint(project: &Project, project_team: Option<&Team>, user_id: Uuid) -> bool {
    can_manage_project(project, project_team, user_id)
}

pub fn has_elevated_role(actor: &RequestContext) -> bool {
    actor.is_staff || actor.is_superuser
}

pub fn can_view_team(actor: &RequestContext, team: &Team, memberships: &[TeamMember]) -> bool {
    has_elevated_role(actor)
        || is_owner(team, actor.user_id)
        || is_member(team, actor.user_id, memberships)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn team(owner: Option<Uuid>) -> Team {
        Team {
            id: Uuid::new_v4(),
            name: "Eng".to_string(),
            description: String::new(),
            owner_id: owner,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn membership(team: &Team, user_id: Uuid, owner: bool) -> TeamMember {
        TeamMember {
            id: Uuid::new_v4(),
            user_id,
            team_id: team.id,
            is_owner: owner,
            joined_at: Utc::now(),
        }
    }

    fn project(team_id: Option<Uuid>, owner_id: Option<Uuid>) -> Project {
        Project {
            id: Uuid::new_v4(),
            workspace_id: Uuid::new_v4(),
            team_id,
            owner_id,
            title: "Backend".to_string(),
            description: String::new(),
            started_at: Utc::now(),
            ended_at: Utc::now(),
            deadline: Utc::now(),
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn ctx(user_id: Uuid) -> RequestContext {
        RequestContext {
            user_id,
            is_staff: false,
            is_superuser: false,
        }
    }

    #[test]
    fn owner_is_only_the_recorded_owner() {
        let owner = Uuid::new_v4();
        let member = Uuid::new_v4();
        let t = team(Some(owner));
        assert!(is_owner(&t, owner));
        assert!(!is_owner(&t, member));
        assert!(!is_owner(&team(None), owner));
    }

    #[test]
    fn membership_requires_matching_row() {
        let user = Uuid::new_v4();
        let t = team(None);
        let other = team(None);
        assert!(is_member(&t, user, &[membership(&t, user, false)]));
        assert!(!is_member(&t, user, &[membership(&other, user, false)]));
        assert!(!is_member(&t, user, &[]));
    }

    #[test]
    fn sprint_creation_prefers_team_owner() {
        let owner = Uuid::new_v4();
        let project_owner = Uuid::new_v4();
        let t = team(Some(owner));
        let p = project(Some(t.id), Some(project_owner));
        assert!(can_create_sprint(&p, Some(&t), owner));
        assert!(!can_create_sprint(&p, Some(&t), project_owner));
    }

    #[test]
    fn sprint_creation_falls_back_to_project_owner() {
        let project_owner = Uuid::new_v4();
        let p = project(None, Some(project_owner));
        assert!(can_create_sprint(&p, None, project_owner));
        assert!(!can_create_sprint(&p, None, Uuid::new_v4()));
    }

    #[test]
    fn elevated_actor_sees_any_team() {
        let t = team(Some(Uuid::new_v4()));
        let mut actor = ctx(Uuid::new_v4());
        assert!(!can_view_team(&actor, &t, &[]));
        actor.is_staff = true;
        assert!(can_view_team(&actor, &t, &[]));
    }
}

use chrono::Utc;
use uuid::Uuid;
use vazifeban::{
    db::models::{Project, Team, TeamMember, Workspace},
    permissions::{can_create_sprint, can_view_team, is_member, is_workspace_owner},
    services::context::RequestContext,
};

fn team(owner_id: Option<Uuid>) -> Team {
    Team {
        id: Uuid::new_v4(),
        name: "Platform".to_string(),
        description: "Infra and tooling".to_string(),
        owner_id,
        is_deleted: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn workspace(team_id: Uuid) -> Workspace {
    Workspace {
        id: Uuid::new_v4(),
        team_id,
        title: "Q3".to_string(),
        is_deleted: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn project(workspace: &Workspace, owner_id: Uuid) -> Project {
    Project {
        id: Uuid::new_v4(),
        workspace_id: workspace.id,
        team_id: Some(workspace.team_id),
        owner_id: Some(owner_id),
        title: "Billing".to_string(),
        description: String::new(),
        started_at: Utc::now(),
        ended_at: Utc::now(),
        deadline: Utc::now(),
        is_deleted: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn actor(user_id: Uuid, is_staff: bool) -> RequestContext {
    RequestContext {
        user_id,
        is_staff,
        is_superuser: false,
    }
}

#[test]
fn workspace_owner_must_own_the_workspace_team() {
    let owner = Uuid::new_v4();
    let t = team(Some(owner));
    let ws = workspace(t.id);
    let foreign = workspace(Uuid::new_v4());

    assert!(is_workspace_owner(&ws, &t, owner));
    assert!(!is_workspace_owner(&foreign, &t, owner));
    assert!(!is_workspace_owner(&ws, &t, Uuid::new_v4()));
}

#[test]
fn only_team_owner_creates_sprints_in_team_projects() {
    let owner = Uuid::new_v4();
    let member = Uuid::new_v4();
    let t = team(Some(owner));
    let ws = workspace(t.id);
    let p = project(&ws, owner);

    assert!(can_create_sprint(&p, Some(&t), owner));
    assert!(!can_create_sprint(&p, Some(&t), member));
}

#[test]
fn staff_see_every_team_and_outsiders_see_none() {
    let owner = Uuid::new_v4();
    let member = Uuid::new_v4();
    let t = team(Some(owner));
    let memberships = vec![TeamMember {
        id: Uuid::new_v4(),
        user_id: member,
        team_id: t.id,
        is_owner: false,
        joined_at: Utc::now(),
    }];

    assert!(is_member(&t, member, &memberships));
    assert!(can_view_team(&actor(member, false), &t, &memberships));
    assert!(can_view_team(&actor(Uuid::new_v4(), true), &t, &memberships));
    assert!(!can_view_team(&actor(Uuid::new_v4(), false), &t, &memberships));
}

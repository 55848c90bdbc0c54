use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::soft_delete::SoftDeletable;

// Team models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner_id: Option<Uuid>,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl SoftDeletable for Team {
    fn is_removed(&self) -> bool {
        self.is_deleted
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::teams)]
pub struct NewTeam {
    pub name: String,
    pub description: String,
    pub owner_id: Option<Uuid>,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::teams)]
pub struct TeamChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<Option<Uuid>>,
}

// Membership models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::team_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TeamMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub team_id: Uuid,
    pub is_owner: bool,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::team_members)]
pub struct NewTeamMember {
    pub user_id: Uuid,
    pub team_id: Uuid,
    pub is_owner: bool,
}

// Team API DTOs
#[derive(Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 255, message = "Team name must be between 1 and 255 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 255, message = "Team name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    /// Transfers ownership to another current member.
    pub owner_id: Option<Uuid>,
}

#[derive(Deserialize, Validate)]
pub struct AddTeamMemberRequest {
    pub user_id: Uuid,
}

#[derive(Serialize)]
pub struct TeamMemberInfo {
    pub user: super::auth::UserBasicInfo,
    pub is_owner: bool,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
pub struct TeamDetailResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner_id: Option<Uuid>,
    pub members: Vec<TeamMemberInfo>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

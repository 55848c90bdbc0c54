use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::soft_delete::SoftDeletable;

// Project models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Project {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub team_id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub ended_at: chrono::DateTime<chrono::Utc>,
    pub deadline: chrono::DateTime<chrono::Utc>,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl SoftDeletable for Project {
    fn is_removed(&self) -> bool {
        self.is_deleted
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::projects)]
pub struct NewProject {
    pub workspace_id: Uuid,
    pub team_id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub ended_at: chrono::DateTime<chrono::Utc>,
    pub deadline: chrono::DateTime<chrono::Utc>,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::projects)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
}

impl ProjectChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.ended_at.is_none()
            && self.deadline.is_none()
    }
}

// Project API DTOs
#[derive(Deserialize, Validate)]
pub struct CreateProjectRequest {
    pub workspace_id: Uuid,
    #[validate(length(min = 1, max = 50, message = "Title must be between 1 and 50 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ended_at: chrono::DateTime<chrono::Utc>,
    pub deadline: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 50, message = "Title must be between 1 and 50 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<&UpdateProjectRequest> for ProjectChanges {
    fn from(req: &UpdateProjectRequest) -> Self {
        Self {
            title: req.title.clone(),
            description: req.description.clone(),
            ended_at: req.ended_at,
            deadline: req.deadline,
        }
    }
}

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::SprintState;
use crate::db::soft_delete::SoftDeletable;

// Sprint models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::sprints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Sprint {
    pub id: Uuid,
    pub project_id: Uuid,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub ended_at: chrono::DateTime<chrono::Utc>,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl SoftDeletable for Sprint {
    fn is_removed(&self) -> bool {
        self.is_deleted
    }
}

impl Sprint {
    pub fn state_at(&self, now: chrono::DateTime<chrono::Utc>) -> SprintState {
        if self.ended_at >= now {
            SprintState::Active
        } else {
            SprintState::Completed
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sprints)]
pub struct NewSprint {
    pub project_id: Uuid,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub ended_at: chrono::DateTime<chrono::Utc>,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::sprints)]
pub struct SprintChanges {
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl SprintChanges {
    pub fn is_empty(&self) -> bool {
        self.started_at.is_none() && self.ended_at.is_none()
    }
}

// Sprint API DTOs
#[derive(Deserialize, Validate)]
pub struct CreateSprintRequest {
    pub project_id: Uuid,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ended_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateSprintRequest {
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Deserialize)]
pub struct SprintListQuery {
    pub state: Option<SprintState>,
}

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::soft_delete::SoftDeletable;

// Work time models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::work_times)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkTime {
    pub id: Uuid,
    pub task_id: Uuid,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl SoftDeletable for WorkTime {
    fn is_removed(&self) -> bool {
        self.is_deleted
    }
}

impl WorkTime {
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::work_times)]
pub struct NewWorkTime {
    pub task_id: Uuid,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Deserialize, Validate)]
pub struct StartWorkTimeRequest {
    pub task_id: Uuid,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CompleteWorkTimeRequest {
    /// Defaults to the current time.
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
}

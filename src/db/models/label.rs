use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::soft_delete::SoftDeletable;

// Label models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::labels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Label {
    pub id: Uuid,
    pub name: String,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl SoftDeletable for Label {
    fn is_removed(&self) -> bool {
        self.is_deleted
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::labels)]
pub struct NewLabel {
    pub name: String,
}

// Task-label link
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::task_labels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskLabel {
    pub id: Uuid,
    pub label_id: Option<Uuid>,
    pub task_id: Option<Uuid>,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl SoftDeletable for TaskLabel {
    fn is_removed(&self) -> bool {
        self.is_deleted
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::task_labels)]
pub struct NewTaskLabel {
    pub label_id: Option<Uuid>,
    pub task_id: Option<Uuid>,
}

// Label API DTOs
#[derive(Deserialize, Validate)]
pub struct CreateLabelRequest {
    #[validate(length(min = 1, max = 50, message = "Label name must be between 1 and 50 characters"))]
    pub name: String,
}

#[derive(Deserialize, Validate)]
pub struct UpdateLabelRequest {
    #[validate(length(min = 1, max = 50, message = "Label name must be between 1 and 50 characters"))]
    pub name: String,
}

#[derive(Deserialize, Validate)]
pub struct AttachLabelRequest {
    pub label_id: Uuid,
}

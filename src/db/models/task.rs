use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::TaskStatus;
use crate::db::soft_delete::SoftDeletable;

use super::attachment::AttachmentInfo;
use super::comment::Comment;
use super::label::Label;
use super::work_time::WorkTime;

// Task models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Task {
    pub id: Uuid,
    pub sprint_id: Uuid,
    pub user_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl SoftDeletable for Task {
    fn is_removed(&self) -> bool {
        self.is_deleted
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tasks)]
pub struct NewTask {
    pub sprint_id: Uuid,
    pub user_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::tasks)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub deadline: Option<Option<chrono::DateTime<chrono::Utc>>>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.deadline.is_none()
    }
}

// Task API DTOs
#[derive(Deserialize, Validate)]
pub struct CreateTaskRequest {
    pub sprint_id: Uuid,
    #[validate(length(min = 1, max = 50, message = "Title must be between 1 and 50 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub user_id: Option<Uuid>,
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 50, message = "Title must be between 1 and 50 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<&UpdateTaskRequest> for TaskChanges {
    fn from(req: &UpdateTaskRequest) -> Self {
        Self {
            title: req.title.clone(),
            description: req.description.clone(),
            status: req.status,
            deadline: req.deadline.map(Some),
        }
    }
}

/// `user_id: null` clears the assignee.
#[derive(Deserialize, Validate)]
pub struct AssignTaskRequest {
    pub user_id: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct TaskListQuery {
    pub status: Option<TaskStatus>,
}

#[derive(Deserialize)]
pub struct TaskArchiveQuery {
    pub sprint_id: Uuid,
}

#[derive(Serialize)]
pub struct TaskDetailResponse {
    #[serde(flatten)]
    pub task: Task,
    pub labels: Vec<Label>,
    pub comments: Vec<Comment>,
    pub attachments: Vec<AttachmentInfo>,
    pub work_times: Vec<WorkTime>,
}

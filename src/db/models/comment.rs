use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::soft_delete::SoftDeletable;

// Comment models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub id: Uuid,
    pub task_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl SoftDeletable for Comment {
    fn is_removed(&self) -> bool {
        self.is_deleted
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment {
    pub task_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
}

#[derive(Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub task_id: Uuid,
    #[validate(length(min = 1, max = 10000, message = "Comment content must be between 1 and 10000 characters"))]
    pub content: String,
}

#[derive(Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 10000, message = "Comment content must be between 1 and 10000 characters"))]
    pub content: String,
}

use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::comment::{Comment, CreateCommentRequest, NewComment},
    db::repositories::CommentRepo,
    db::soft_delete::{Visibility, require_active},
    error::AppError,
    services::context::RequestContext,
    services::scope,
    validation::comment::validate_comment_content,
};

pub struct CommentsService;

impl CommentsService {
    pub fn list_by_task(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: Uuid,
    ) -> Result<Vec<Comment>, AppError> {
        let task = scope::require_task_access(conn, ctx, task_id)?;
        Ok(CommentRepo::list_by_task(conn, task.id, Visibility::Active)?)
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateCommentRequest,
    ) -> Result<Comment, AppError> {
        validate_comment_content(&req.content)?;
        let task = scope::require_task_access(conn, ctx, req.task_id)?;

        let comment = CommentRepo::insert(
            conn,
            &NewComment {
                task_id: task.id,
                user_id: ctx.user_id,
                content: req.content.clone(),
            },
        )?;

        tracing::info!(comment_id = %comment.id, task_id = %task.id, "Comment created");
        Ok(comment)
    }

    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        comment_id: Uuid,
    ) -> Result<Comment, AppError> {
        let comment = require_active(CommentRepo::find_by_id(conn, comment_id)?, "Comment")?;
        scope::require_task_access(conn, ctx, comment.task_id)?;
        Ok(comment)
    }

    fn require_author(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        comment_id: Uuid,
    ) -> Result<Comment, AppError> {
        let comment = Self::get(conn, ctx, comment_id)?;
        if comment.user_id != ctx.user_id {
            return Err(AppError::forbidden("You can only modify your own comments"));
        }
        Ok(comment)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        comment_id: Uuid,
        content: &str,
    ) -> Result<Comment, AppError> {
        validate_comment_content(content)?;
        let comment = Self::require_author(conn, ctx, comment_id)?;

        let updated = CommentRepo::update_content(conn, comment.id, content)?;
        tracing::info!(comment_id = %updated.id, "Comment updated");
        Ok(updated)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        comment_id: Uuid,
    ) -> Result<(), AppError> {
        let comment = Self::require_author(conn, ctx, comment_id)?;

        CommentRepo::soft_delete(conn, comment.id)?;
        tracing::info!(comment_id = %comment.id, "Comment deleted");
        Ok(())
    }
}

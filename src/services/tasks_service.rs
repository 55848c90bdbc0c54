use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::attachment::AttachmentInfo,
    db::models::label::{Label, NewTaskLabel},
    db::models::task::{
        CreateTaskRequest, NewTask, Task, TaskChanges, TaskDetailResponse, UpdateTaskRequest,
    },
    db::repositories::{
        AttachmentRepo, CommentRepo, LabelRepo, SprintRepo, TaskLabelRepo, TaskRepo, UserRepo,
        WorkTimeRepo,
    },
    db::soft_delete::{Visibility, require_active},
    error::AppError,
    permissions::is_owner,
    services::context::RequestContext,
    services::scope,
    validation::schedule::validate_title,
};

pub struct TasksService;

impl TasksService {
    fn require_assignee(conn: &mut PgConnection, user_id: Option<Uuid>) -> Result<(), AppError> {
        if let Some(user_id) = user_id {
            if !UserRepo::find_by_id(conn, user_id)?.is_some_and(|user| !user.is_deleted) {
                return Err(AppError::field("user_id", "Assignee does not exist"));
            }
        }
        Ok(())
    }

    /// Any authenticated actor may add a task to an active sprint.
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateTaskRequest,
    ) -> Result<Task, AppError> {
        validate_title(&req.title)?;

        let sprint = SprintRepo::find_by_id(conn, req.sprint_id)?
            .filter(|sprint| !sprint.is_deleted)
            .ok_or_else(|| AppError::field("sprint_id", "Sprint does not exist"))?;

        Self::require_assignee(conn, req.user_id)?;

        let task = TaskRepo::insert(
            conn,
            &NewTask {
                sprint_id: sprint.id,
                user_id: req.user_id,
                title: req.title.trim().to_string(),
                description: req.description.clone(),
                status: req.status,
                deadline: req.deadline,
            },
        )?;

        tracing::info!(task_id = %task.id, sprint_id = %sprint.id, actor = %ctx.user_id, "Task created");
        Ok(task)
    }

    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: Uuid,
    ) -> Result<TaskDetailResponse, AppError> {
        let task = scope::require_task_access(conn, ctx, task_id)?;

        let labels = LabelRepo::list_for_task(conn, task.id)?;
        let comments = CommentRepo::list_by_task(conn, task.id, Visibility::Active)?;
        let attachments = AttachmentRepo::list_by_task(conn, task.id, Visibility::Active)?
            .iter()
            .map(AttachmentInfo::from)
            .collect();
        let work_times = WorkTimeRepo::list_by_task(conn, task.id, Visibility::Active)?;

        Ok(TaskDetailResponse {
            task,
            labels,
            comments,
            attachments,
            work_times,
        })
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: Uuid,
        req: &UpdateTaskRequest,
    ) -> Result<Task, AppError> {
        let task = scope::require_task_access(conn, ctx, task_id)?;

        if let Some(ref title) = req.title {
            validate_title(title)?;
        }

        let mut changes = TaskChanges::from(req);
        changes.title = changes.title.map(|t| t.trim().to_string());
        if changes.is_empty() {
            return Ok(task);
        }

        let updated = TaskRepo::update(conn, task.id, &changes)?;
        tracing::info!(task_id = %updated.id, status = updated.status.as_str(), "Task updated");
        Ok(updated)
    }

    pub fn assign(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<Task, AppError> {
        let task = scope::require_task_access(conn, ctx, task_id)?;
        Self::require_assignee(conn, user_id)?;

        let updated = TaskRepo::assign(conn, task.id, user_id)?;
        tracing::info!(task_id = %updated.id, assignee = ?user_id, "Task assignee changed");
        Ok(updated)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: Uuid,
    ) -> Result<(), AppError> {
        let task = scope::require_task_access(conn, ctx, task_id)?;

        TaskRepo::soft_delete(conn, task.id)?;
        tracing::info!(task_id = %task.id, "Task deleted");
        Ok(())
    }

    /// Removed tasks of one sprint, for elevated actors and the team owner.
    pub fn list_archived(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        sprint_id: Uuid,
    ) -> Result<Vec<Task>, AppError> {
        let sprint = SprintRepo::find_by_id(conn, sprint_id)?
            .ok_or_else(|| AppError::not_found("Sprint"))?;

        if !ctx.is_elevated() {
            let team_id = SprintRepo::owning_team_id(conn, sprint.id)?
                .ok_or_else(|| AppError::not_found("Team"))?;
            let team = scope::load_team(conn, team_id)?;
            if !is_owner(&team, ctx.user_id) {
                return Err(AppError::forbidden(
                    "Only the team owner can view archived tasks",
                ));
            }
        }

        Ok(TaskRepo::list_by_sprint(conn, sprint.id, Visibility::Archived, None)?)
    }

    pub fn list_labels(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: Uuid,
    ) -> Result<Vec<Label>, AppError> {
        let task = scope::require_task_access(conn, ctx, task_id)?;
        Ok(LabelRepo::list_for_task(conn, task.id)?)
    }

    pub fn attach_label(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: Uuid,
        label_id: Uuid,
    ) -> Result<Vec<Label>, AppError> {
        let task = scope::require_task_access(conn, ctx, task_id)?;
        let label = require_active(LabelRepo::find_by_id(conn, label_id)?, "Label")?;

        if TaskLabelRepo::find_active(conn, task.id, label.id)?.is_some() {
            return Err(AppError::field("label_id", "Label is already attached to this task"));
        }

        TaskLabelRepo::insert(
            conn,
            &NewTaskLabel {
                label_id: Some(label.id),
                task_id: Some(task.id),
            },
        )
        .map_err(|e| {
            AppError::unique_violation(e, "label_id", "Label is already attached to this task")
        })?;

        tracing::info!(task_id = %task.id, label_id = %label.id, "Label attached");
        Ok(LabelRepo::list_for_task(conn, task.id)?)
    }

    pub fn detach_label(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: Uuid,
        label_id: Uuid,
    ) -> Result<(), AppError> {
        let task = scope::require_task_access(conn, ctx, task_id)?;
        let link = TaskLabelRepo::find_active(conn, task.id, label_id)?
            .ok_or_else(|| AppError::not_found("Task label"))?;

        TaskLabelRepo::soft_delete(conn, link.id)?;
        tracing::info!(task_id = %task.id, label_id = %label_id, "Label detached");
        Ok(())
    }
}

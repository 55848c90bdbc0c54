use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    AppState,
    db::models::{
        api::{ApiResponse, ResponseMeta},
        auth::AuthUser,
        label::AttachLabelRequest,
        task::{AssignTaskRequest, CreateTaskRequest, TaskArchiveQuery, UpdateTaskRequest},
    },
    services::{
        AttachmentsService, CommentsService, TasksService, WorkTimesService,
        context::RequestContext,
    },
    validation::ValidatedJson,
};

use super::db_unavailable;

pub async fn create_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateTaskRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TasksService::create(&mut conn, &ctx, &payload) {
        Ok(task) => {
            let response = ApiResponse::created(task, "Task created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_archived_tasks(
    State(state): State<AppState>,
    Query(params): Query<TaskArchiveQuery>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TasksService::list_archived(&mut conn, &ctx, params.sprint_id) {
        Ok(tasks) => {
            let meta = ResponseMeta::count(tasks.len());
            let response =
                ApiResponse::success_with_meta(tasks, "Archived tasks retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TasksService::get(&mut conn, &ctx, task_id) {
        Ok(task) => {
            let response = ApiResponse::success(task, "Task retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateTaskRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TasksService::update(&mut conn, &ctx, task_id, &payload) {
        Ok(task) => {
            let response = ApiResponse::success(task, "Task updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TasksService::delete(&mut conn, &ctx, task_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Task deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn assign_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<AssignTaskRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TasksService::assign(&mut conn, &ctx, task_id, payload.user_id) {
        Ok(task) => {
            let response = ApiResponse::success(task, "Task assignee updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_task_labels(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TasksService::list_labels(&mut conn, &ctx, task_id) {
        Ok(labels) => {
            let meta = ResponseMeta::count(labels.len());
            let response =
                ApiResponse::success_with_meta(labels, "Task labels retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn attach_label(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<AttachLabelRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TasksService::attach_label(&mut conn, &ctx, task_id, payload.label_id) {
        Ok(labels) => {
            let response = ApiResponse::created(labels, "Label attached successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn detach_label(
    State(state): State<AppState>,
    Path((task_id, label_id)): Path<(Uuid, Uuid)>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TasksService::detach_label(&mut conn, &ctx, task_id, label_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Label detached successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_task_comments(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match CommentsService::list_by_task(&mut conn, &ctx, task_id) {
        Ok(comments) => {
            let meta = ResponseMeta::count(comments.len());
            let response =
                ApiResponse::success_with_meta(comments, "Comments retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_task_attachments(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match AttachmentsService::list_by_task(&mut conn, &ctx, task_id) {
        Ok(attachments) => {
            let meta = ResponseMeta::count(attachments.len());
            let response = ApiResponse::success_with_meta(
                attachments,
                "Attachments retrieved successfully",
                meta,
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_task_work_times(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match WorkTimesService::list_by_task(&mut conn, &ctx, task_id) {
        Ok(work_times) => {
            let meta = ResponseMeta::count(work_times.len());
            let response =
                ApiResponse::success_with_meta(work_times, "Work times retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

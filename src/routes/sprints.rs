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
        sprint::{CreateSprintRequest, UpdateSprintRequest},
        task::TaskListQuery,
    },
    services::{SprintsService, context::RequestContext},
    validation::ValidatedJson,
};

use super::db_unavailable;

pub async fn create_sprint(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateSprintRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match SprintsService::create(&mut conn, &ctx, &payload) {
        Ok(sprint) => {
            let response = ApiResponse::created(sprint, "Sprint created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_archived_sprints(State(state): State<AppState>, auth_user: AuthUser) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match SprintsService::list_archived(&mut conn, &ctx) {
        Ok(sprints) => {
            let meta = ResponseMeta::count(sprints.len());
            let response = ApiResponse::success_with_meta(
                sprints,
                "Archived sprints retrieved successfully",
                meta,
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_sprint(
    State(state): State<AppState>,
    Path(sprint_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match SprintsService::get(&mut conn, &ctx, sprint_id) {
        Ok(sprint) => {
            let response = ApiResponse::success(sprint, "Sprint retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_sprint(
    State(state): State<AppState>,
    Path(sprint_id): Path<Uuid>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateSprintRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match SprintsService::update(&mut conn, &ctx, sprint_id, &payload) {
        Ok(sprint) => {
            let response = ApiResponse::success(sprint, "Sprint updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_sprint(
    State(state): State<AppState>,
    Path(sprint_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match SprintsService::delete(&mut conn, &ctx, sprint_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Sprint deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_sprint_tasks(
    State(state): State<AppState>,
    Path(sprint_id): Path<Uuid>,
    Query(params): Query<TaskListQuery>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match SprintsService::list_tasks(&mut conn, &ctx, sprint_id, params.status) {
        Ok(tasks) => {
            let meta = ResponseMeta::count(tasks.len());
            let response = ApiResponse::success_with_meta(tasks, "Tasks retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

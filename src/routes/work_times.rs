use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    AppState,
    db::models::{
        api::ApiResponse,
        auth::AuthUser,
        work_time::StartWorkTimeRequest,
    },
    services::{WorkTimesService, context::RequestContext},
    validation::{ValidatedJson, work_time::parse_completion_body},
};

use super::db_unavailable;

pub async fn start_work_time(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<StartWorkTimeRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match WorkTimesService::start(&mut conn, &ctx, payload.task_id, payload.started_at) {
        Ok(work_time) => {
            let response = ApiResponse::created(work_time, "Work time started successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_work_time(
    State(state): State<AppState>,
    Path(work_time_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match WorkTimesService::get(&mut conn, &ctx, work_time_id) {
        Ok(work_time) => {
            let response = ApiResponse::success(work_time, "Work time retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// An empty body closes the interval at the current time. A body that does not
/// parse is rejected.
pub async fn complete_work_time(
    State(state): State<AppState>,
    Path(work_time_id): Path<Uuid>,
    auth_user: AuthUser,
    body: Bytes,
) -> Response {
    let payload = match parse_completion_body(&body) {
        Ok(payload) => payload,
        Err(err) => return err.into_response(),
    };

    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match WorkTimesService::complete(&mut conn, &ctx, work_time_id, payload.ended_at) {
        Ok(work_time) => {
            let response = ApiResponse::success(work_time, "Work time completed successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_work_time(
    State(state): State<AppState>,
    Path(work_time_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match WorkTimesService::delete(&mut conn, &ctx, work_time_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Work time deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

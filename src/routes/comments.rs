use axum::{
    Json,
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
        comment::{CreateCommentRequest, UpdateCommentRequest},
    },
    services::{CommentsService, context::RequestContext},
    validation::ValidatedJson,
};

use super::db_unavailable;

pub async fn create_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateCommentRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match CommentsService::create(&mut conn, &ctx, &payload) {
        Ok(comment) => {
            let response = ApiResponse::created(comment, "Comment created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match CommentsService::get(&mut conn, &ctx, comment_id) {
        Ok(comment) => {
            let response = ApiResponse::success(comment, "Comment retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateCommentRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match CommentsService::update(&mut conn, &ctx, comment_id, &payload.content) {
        Ok(comment) => {
            let response = ApiResponse::success(comment, "Comment updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match CommentsService::delete(&mut conn, &ctx, comment_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Comment deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

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
        api::{ApiResponse, ResponseMeta},
        auth::AuthUser,
        label::{CreateLabelRequest, UpdateLabelRequest},
    },
    services::{LabelsService, context::RequestContext},
    validation::ValidatedJson,
};

use super::db_unavailable;

pub async fn create_label(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateLabelRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match LabelsService::create(&mut conn, &ctx, &payload) {
        Ok(label) => {
            let response = ApiResponse::created(label, "Label created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_labels(State(state): State<AppState>, _auth_user: AuthUser) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    match LabelsService::list(&mut conn) {
        Ok(labels) => {
            let meta = ResponseMeta::count(labels.len());
            let response = ApiResponse::success_with_meta(labels, "Labels retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_archived_labels(State(state): State<AppState>, auth_user: AuthUser) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match LabelsService::list_archived(&mut conn, &ctx) {
        Ok(labels) => {
            let meta = ResponseMeta::count(labels.len());
            let response =
                ApiResponse::success_with_meta(labels, "Archived labels retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_label(
    State(state): State<AppState>,
    Path(label_id): Path<Uuid>,
    _auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    match LabelsService::get(&mut conn, label_id) {
        Ok(label) => {
            let response = ApiResponse::success(label, "Label retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_label(
    State(state): State<AppState>,
    Path(label_id): Path<Uuid>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateLabelRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match LabelsService::update(&mut conn, &ctx, label_id, &payload) {
        Ok(label) => {
            let response = ApiResponse::success(label, "Label updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_label(
    State(state): State<AppState>,
    Path(label_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match LabelsService::delete(&mut conn, &ctx, label_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Label deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

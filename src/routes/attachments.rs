use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    AppState,
    db::models::{
        api::ApiResponse,
        attachment::{AttachmentInfo, CreateAttachmentRequest, UpdateAttachmentRequest},
        auth::AuthUser,
    },
    services::{AttachmentsService, context::RequestContext},
    validation::ValidatedJson,
};

use super::db_unavailable;

pub async fn upload_attachment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateAttachmentRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match AttachmentsService::create(&mut conn, &ctx, &payload, state.config.max_attachment_bytes) {
        Ok(info) => {
            let response = ApiResponse::created(info, "Attachment uploaded successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_attachment(
    State(state): State<AppState>,
    Path(attachment_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match AttachmentsService::get(&mut conn, &ctx, attachment_id) {
        Ok(attachment) => {
            let response = ApiResponse::success(
                AttachmentInfo::from(&attachment),
                "Attachment retrieved successfully",
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// Raw file body with its stored content type.
pub async fn download_attachment(
    State(state): State<AppState>,
    Path(attachment_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match AttachmentsService::get(&mut conn, &ctx, attachment_id) {
        Ok(attachment) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                attachment.file_name.replace('"', "")
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, attachment.content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                attachment.content,
            )
                .into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_attachment(
    State(state): State<AppState>,
    Path(attachment_id): Path<Uuid>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateAttachmentRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match AttachmentsService::update(&mut conn, &ctx, attachment_id, &payload) {
        Ok(info) => {
            let response = ApiResponse::success(info, "Attachment updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_attachment(
    State(state): State<AppState>,
    Path(attachment_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match AttachmentsService::delete(&mut conn, &ctx, attachment_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Attachment deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

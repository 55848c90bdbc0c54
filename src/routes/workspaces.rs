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
        workspace::{CreateWorkspaceRequest, UpdateWorkspaceRequest},
    },
    services::{WorkspacesService, context::RequestContext},
    validation::ValidatedJson,
};

use super::db_unavailable;

pub async fn create_workspace(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateWorkspaceRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match WorkspacesService::create(&mut conn, &ctx, &payload) {
        Ok(workspace) => {
            let response = ApiResponse::created(workspace, "Workspace created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_workspaces(State(state): State<AppState>, auth_user: AuthUser) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match WorkspacesService::list(&mut conn, &ctx) {
        Ok(workspaces) => {
            let meta = ResponseMeta::count(workspaces.len());
            let response =
                ApiResponse::success_with_meta(workspaces, "Workspaces retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_archived_workspaces(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match WorkspacesService::list_archived(&mut conn, &ctx) {
        Ok(workspaces) => {
            let meta = ResponseMeta::count(workspaces.len());
            let response = ApiResponse::success_with_meta(
                workspaces,
                "Archived workspaces retrieved successfully",
                meta,
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_workspace(
    State(state): State<AppState>,
    Path(workspace_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match WorkspacesService::get(&mut conn, &ctx, workspace_id) {
        Ok(workspace) => {
            let response = ApiResponse::success(workspace, "Workspace retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_workspace_summary(
    State(state): State<AppState>,
    Path(workspace_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match WorkspacesService::summary(&mut conn, &ctx, workspace_id) {
        Ok(summary) => {
            let response = ApiResponse::success(summary, "Workspace summary retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_workspace(
    State(state): State<AppState>,
    Path(workspace_id): Path<Uuid>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateWorkspaceRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match WorkspacesService::update(&mut conn, &ctx, workspace_id, &payload) {
        Ok(workspace) => {
            let response = ApiResponse::success(workspace, "Workspace updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_workspace(
    State(state): State<AppState>,
    Path(workspace_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match WorkspacesService::delete(&mut conn, &ctx, workspace_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Workspace deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

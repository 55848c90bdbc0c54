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
        project::{CreateProjectRequest, UpdateProjectRequest},
        sprint::SprintListQuery,
    },
    services::{ProjectsService, context::RequestContext},
    validation::ValidatedJson,
};

use super::db_unavailable;

pub async fn create_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateProjectRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match ProjectsService::create(&mut conn, &ctx, &payload) {
        Ok(project) => {
            let response = ApiResponse::created(project, "Project created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_projects(State(state): State<AppState>, auth_user: AuthUser) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match ProjectsService::list(&mut conn, &ctx) {
        Ok(projects) => {
            let meta = ResponseMeta::count(projects.len());
            let response =
                ApiResponse::success_with_meta(projects, "Projects retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_archived_projects(State(state): State<AppState>, auth_user: AuthUser) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match ProjectsService::list_archived(&mut conn, &ctx) {
        Ok(projects) => {
            let meta = ResponseMeta::count(projects.len());
            let response = ApiResponse::success_with_meta(
                projects,
                "Archived projects retrieved successfully",
                meta,
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match ProjectsService::get(&mut conn, &ctx, project_id) {
        Ok(project) => {
            let response = ApiResponse::success(project, "Project retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateProjectRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match ProjectsService::update(&mut conn, &ctx, project_id, &payload) {
        Ok(project) => {
            let response = ApiResponse::success(project, "Project updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match ProjectsService::delete(&mut conn, &ctx, project_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Project deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// `?state=active|completed` narrows by `ended_at` relative to now.
pub async fn get_project_sprints(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Query(params): Query<SprintListQuery>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match ProjectsService::list_sprints(&mut conn, &ctx, project_id, params.state) {
        Ok(sprints) => {
            let meta = ResponseMeta::count(sprints.len());
            let response =
                ApiResponse::success_with_meta(sprints, "Sprints retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

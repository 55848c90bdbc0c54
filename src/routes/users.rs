use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    db::models::{
        api::{ApiResponse, ResponseMeta},
        auth::{AuthUser, ChangePasswordRequest, UpdateProfileRequest, UserInfo},
    },
    services::{UsersService, context::RequestContext},
    validation::ValidatedJson,
};

use super::db_unavailable;

pub async fn get_profile(State(state): State<AppState>, auth_user: AuthUser) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match UsersService::get_profile(&mut conn, &ctx) {
        Ok(user) => {
            let response = ApiResponse::success(UserInfo::from(user), "Profile retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match UsersService::update_profile(&mut conn, &ctx, &payload) {
        Ok(user) => {
            let response = ApiResponse::success(UserInfo::from(user), "Profile updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match UsersService::change_password(&mut conn, &state.auth_service, &ctx, &payload) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Password changed successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_account(State(state): State<AppState>, auth_user: AuthUser) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match UsersService::deactivate(&mut conn, &ctx) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Account deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn list_users(State(state): State<AppState>, auth_user: AuthUser) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match UsersService::list(&mut conn, &ctx) {
        Ok(users) => {
            let total = users.len();
            let users: Vec<UserInfo> = users.into_iter().map(UserInfo::from).collect();
            let response = ApiResponse::success_with_meta(
                users,
                "Users retrieved successfully",
                ResponseMeta::count(total),
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    db::models::{
        api::ApiResponse,
        auth::{LoginRequest, RefreshTokenRequest, RegisterRequest, UserInfo},
    },
    services::UsersService,
    validation::ValidatedJson,
};

use super::db_unavailable;

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    match UsersService::register(&mut conn, &state.auth_service, &payload) {
        Ok(user) => {
            let response = ApiResponse::created(UserInfo::from(user), "User registered successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    match UsersService::login(&mut conn, &state.auth_service, &payload) {
        Ok(tokens) => {
            let response = ApiResponse::success(tokens, "Login successful");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    match UsersService::refresh(&mut conn, &state.auth_service, &payload.refresh_token) {
        Ok(tokens) => {
            let response = ApiResponse::success(tokens, "Token refreshed successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

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
        team::{AddTeamMemberRequest, CreateTeamRequest, UpdateTeamRequest},
    },
    services::{TeamMembersService, TeamsService, context::RequestContext},
    validation::ValidatedJson,
};

use super::db_unavailable;

pub async fn create_team(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateTeamRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TeamsService::create(&mut conn, &ctx, &payload) {
        Ok(team) => {
            let response = ApiResponse::created(team, "Team created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_teams(State(state): State<AppState>, auth_user: AuthUser) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TeamsService::list(&mut conn, &ctx) {
        Ok(teams) => {
            let meta = ResponseMeta::count(teams.len());
            let response = ApiResponse::success_with_meta(teams, "Teams retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TeamsService::get(&mut conn, &ctx, team_id) {
        Ok(team) => {
            let response = ApiResponse::success(team, "Team retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateTeamRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TeamsService::update(&mut conn, &ctx, team_id, &payload) {
        Ok(team) => {
            let response = ApiResponse::success(team, "Team updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TeamsService::delete(&mut conn, &ctx, team_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Team deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_team_members(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TeamMembersService::list(&mut conn, &ctx, team_id) {
        Ok(members) => {
            let meta = ResponseMeta::count(members.len());
            let response =
                ApiResponse::success_with_meta(members, "Team members retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn add_team_member(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<AddTeamMemberRequest>,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TeamMembersService::add(&mut conn, &ctx, team_id, payload.user_id) {
        Ok(member) => {
            let response = ApiResponse::created(member, "Team member added successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn remove_team_member(
    State(state): State<AppState>,
    Path((team_id, user_id)): Path<(Uuid, Uuid)>,
    auth_user: AuthUser,
) -> Response {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let ctx = RequestContext::from(&auth_user);
    match TeamMembersService::remove(&mut conn, &ctx, team_id, user_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Team member removed successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

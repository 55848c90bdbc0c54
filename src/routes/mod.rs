pub mod attachments;
pub mod auth;
pub mod comments;
pub mod labels;
pub mod projects;
pub mod sprints;
pub mod tasks;
pub mod teams;
pub mod users;
pub mod work_times;
pub mod workspaces;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};

use crate::{AppState, db::models::api::ApiResponse, middleware::auth_middleware};

pub(crate) fn db_unavailable() -> Response {
    let response = ApiResponse::<()>::internal_error("Database connection failed");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
}

/// Routes that do not require a bearer token.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/users/me",
            get(users::get_profile)
                .put(users::update_profile)
                .delete(users::delete_account),
        )
        .route("/users/me/password", post(users::change_password))
        .route("/users", get(users::list_users))
        .route("/teams", post(teams::create_team).get(teams::get_teams))
        .route(
            "/teams/:team_id",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        .route(
            "/teams/:team_id/members",
            get(teams::get_team_members).post(teams::add_team_member),
        )
        .route(
            "/teams/:team_id/members/:user_id",
            delete(teams::remove_team_member),
        )
        .route(
            "/workspaces",
            post(workspaces::create_workspace).get(workspaces::get_workspaces),
        )
        .route("/workspaces/archive", get(workspaces::get_archived_workspaces))
        .route(
            "/workspaces/:workspace_id",
            get(workspaces::get_workspace)
                .put(workspaces::update_workspace)
                .delete(workspaces::delete_workspace),
        )
        .route(
            "/workspaces/:workspace_id/summary",
            get(workspaces::get_workspace_summary),
        )
        .route(
            "/projects",
            post(projects::create_project).get(projects::get_projects),
        )
        .route("/projects/archive", get(projects::get_archived_projects))
        .route(
            "/projects/:project_id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route(
            "/projects/:project_id/sprints",
            get(projects::get_project_sprints),
        )
        .route("/sprints", post(sprints::create_sprint))
        .route("/sprints/archive", get(sprints::get_archived_sprints))
        .route(
            "/sprints/:sprint_id",
            get(sprints::get_sprint)
                .put(sprints::update_sprint)
                .delete(sprints::delete_sprint),
        )
        .route("/sprints/:sprint_id/tasks", get(sprints::get_sprint_tasks))
        .route("/tasks", post(tasks::create_task))
        .route("/tasks/archive", get(tasks::get_archived_tasks))
        .route(
            "/tasks/:task_id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/tasks/:task_id/assign", post(tasks::assign_task))
        .route(
            "/tasks/:task_id/labels",
            get(tasks::get_task_labels).post(tasks::attach_label),
        )
        .route(
            "/tasks/:task_id/labels/:label_id",
            delete(tasks::detach_label),
        )
        .route("/tasks/:task_id/comments", get(tasks::get_task_comments))
        .route(
            "/tasks/:task_id/attachments",
            get(tasks::get_task_attachments),
        )
        .route("/tasks/:task_id/work-times", get(tasks::get_task_work_times))
        .route("/labels", post(labels::create_label).get(labels::get_labels))
        .route("/labels/archive", get(labels::get_archived_labels))
        .route(
            "/labels/:label_id",
            get(labels::get_label)
                .put(labels::update_label)
                .delete(labels::delete_label),
        )
        .route("/comments", post(comments::create_comment))
        .route(
            "/comments/:comment_id",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route("/attachments", post(attachments::upload_attachment))
        .route(
            "/attachments/:attachment_id",
            get(attachments::get_attachment)
                .put(attachments::update_attachment)
                .delete(attachments::delete_attachment),
        )
        .route(
            "/attachments/:attachment_id/content",
            get(attachments::download_attachment),
        )
        .route("/work-times", post(work_times::start_work_time))
        .route(
            "/work-times/:work_time_id",
            get(work_times::get_work_time).delete(work_times::delete_work_time),
        )
        .route(
            "/work-times/:work_time_id/complete",
            post(work_times::complete_work_time),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware))
}

/// Attachments travel as base64 inside JSON, so the body limit leaves room
/// for the encoding overhead on top of the raw size cap.
fn body_limit(max_attachment_bytes: usize) -> usize {
    max_attachment_bytes / 3 * 4 + 64 * 1024
}

pub fn create_router(state: AppState) -> Router {
    let limit = body_limit(state.config.max_attachment_bytes);
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(&state))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_limit_covers_encoded_attachment() {
        let raw = 10 * 1024 * 1024;
        assert!(body_limit(raw) > raw / 3 * 4);
    }
}

use diesel::prelude::*;

use crate::db::models::project::{NewProject, Project, ProjectChanges};
use crate::db::soft_delete::Visibility;

pub struct ProjectRepo;

impl ProjectRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
    ) -> Result<Option<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(id.eq(project_id))
            .select(Project::as_select())
            .first(conn)
            .optional()
    }

    /// Scoping goes through the workspace, since `projects.team_id` is
    /// nullable once the team row is gone.
    pub fn list(
        conn: &mut PgConnection,
        visibility: Visibility,
        team_ids: Option<Vec<uuid::Uuid>>,
    ) -> Result<Vec<Project>, diesel::result::Error> {
        use crate::schema::{projects, workspaces};
        let mut query = projects::table
            .inner_join(workspaces::table)
            .filter(projects::is_deleted.eq(visibility.is_deleted()))
            .into_boxed();
        if let Some(ids) = team_ids {
            query = query.filter(workspaces::team_id.eq_any(ids));
        }
        query
            .order(projects::created_at.desc())
            .select(Project::as_select())
            .load(conn)
    }

    pub fn list_active_titles_by_workspace(
        conn: &mut PgConnection,
        target_workspace_id: uuid::Uuid,
    ) -> Result<Vec<String>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(workspace_id.eq(target_workspace_id))
            .filter(is_deleted.eq(false))
            .order(created_at.asc())
            .select(title)
            .load(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_project: &NewProject,
    ) -> Result<Project, diesel::result::Error> {
        diesel::insert_into(crate::schema::projects::table)
            .values(new_project)
            .returning(Project::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
        changes: &ProjectChanges,
    ) -> Result<Project, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::update(projects.filter(id.eq(project_id)))
            .set(changes)
            .returning(Project::as_returning())
            .get_result(conn)
    }

    pub fn soft_delete(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
    ) -> Result<Project, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::update(projects.filter(id.eq(project_id)))
            .set(is_deleted.eq(true))
            .returning(Project::as_returning())
            .get_result(conn)
    }
}

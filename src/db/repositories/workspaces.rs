use diesel::prelude::*;

use crate::db::models::workspace::{NewWorkspace, Workspace};
use crate::db::soft_delete::Visibility;

pub struct WorkspaceRepo;

impl WorkspaceRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        workspace_id: uuid::Uuid,
    ) -> Result<Option<Workspace>, diesel::result::Error> {
        use crate::schema::workspaces::dsl::*;
        workspaces
            .filter(id.eq(workspace_id))
            .select(Workspace::as_select())
            .first(conn)
            .optional()
    }

    pub fn list(
        conn: &mut PgConnection,
        visibility: Visibility,
        team_ids: Option<Vec<uuid::Uuid>>,
    ) -> Result<Vec<Workspace>, diesel::result::Error> {
        use crate::schema::workspaces::dsl::*;
        let mut query = workspaces
            .filter(is_deleted.eq(visibility.is_deleted()))
            .into_boxed();
        if let Some(ids) = team_ids {
            query = query.filter(team_id.eq_any(ids));
        }
        query
            .order(created_at.desc())
            .select(Workspace::as_select())
            .load(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_workspace: &NewWorkspace,
    ) -> Result<Workspace, diesel::result::Error> {
        diesel::insert_into(crate::schema::workspaces::table)
            .values(new_workspace)
            .returning(Workspace::as_returning())
            .get_result(conn)
    }

    pub fn update_title(
        conn: &mut PgConnection,
        workspace_id: uuid::Uuid,
        new_title: &str,
    ) -> Result<Workspace, diesel::result::Error> {
        use crate::schema::workspaces::dsl::*;
        diesel::update(workspaces.filter(id.eq(workspace_id)))
            .set(title.eq(new_title))
            .returning(Workspace::as_returning())
            .get_result(conn)
    }

    pub fn soft_delete(
        conn: &mut PgConnection,
        workspace_id: uuid::Uuid,
    ) -> Result<Workspace, diesel::result::Error> {
        use crate::schema::workspaces::dsl::*;
        diesel::update(workspaces.filter(id.eq(workspace_id)))
            .set(is_deleted.eq(true))
            .returning(Workspace::as_returning())
            .get_result(conn)
    }
}

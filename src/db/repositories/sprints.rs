use diesel::prelude::*;

use crate::db::enums::SprintState;
use crate::db::models::sprint::{NewSprint, Sprint, SprintChanges};
use crate::db::soft_delete::Visibility;

pub struct SprintRepo;

impl SprintRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        sprint_id: uuid::Uuid,
    ) -> Result<Option<Sprint>, diesel::result::Error> {
        use crate::schema::sprints::dsl::*;
        sprints
            .filter(id.eq(sprint_id))
            .select(Sprint::as_select())
            .first(conn)
            .optional()
    }

    /// Team that owns the sprint, resolved through project and workspace.
    pub fn owning_team_id(
        conn: &mut PgConnection,
        sprint_id: uuid::Uuid,
    ) -> Result<Option<uuid::Uuid>, diesel::result::Error> {
        use crate::schema::{projects, sprints, workspaces};
        sprints::table
            .inner_join(projects::table.inner_join(workspaces::table))
            .filter(sprints::id.eq(sprint_id))
            .select(workspaces::team_id)
            .first(conn)
            .optional()
    }

    pub fn list(
        conn: &mut PgConnection,
        visibility: Visibility,
        team_ids: Option<Vec<uuid::Uuid>>,
    ) -> Result<Vec<Sprint>, diesel::result::Error> {
        use crate::schema::{projects, sprints, workspaces};
        let mut query = sprints::table
            .inner_join(projects::table.inner_join(workspaces::table))
            .filter(sprints::is_deleted.eq(visibility.is_deleted()))
            .into_boxed();
        if let Some(ids) = team_ids {
            query = query.filter(workspaces::team_id.eq_any(ids));
        }
        query
            .order(sprints::started_at.desc())
            .select(Sprint::as_select())
            .load(conn)
    }

    /// Active project sprints, optionally narrowed to those still running or
    /// already finished at `now`.
    pub fn list_by_project(
        conn: &mut PgConnection,
        target_project_id: uuid::Uuid,
        state: Option<SprintState>,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Sprint>, diesel::result::Error> {
        use crate::schema::sprints::dsl::*;
        let mut query = sprints
            .filter(project_id.eq(target_project_id))
            .filter(is_deleted.eq(false))
            .into_boxed();
        match state {
            Some(SprintState::Active) => query = query.filter(ended_at.ge(now)),
            Some(SprintState::Completed) => query = query.filter(ended_at.lt(now)),
            None => {}
        }
        query
            .order(started_at.asc())
            .select(Sprint::as_select())
            .load(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_sprint: &NewSprint,
    ) -> Result<Sprint, diesel::result::Error> {
        diesel::insert_into(crate::schema::sprints::table)
            .values(new_sprint)
            .returning(Sprint::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        sprint_id: uuid::Uuid,
        changes: &SprintChanges,
    ) -> Result<Sprint, diesel::result::Error> {
        use crate::schema::sprints::dsl::*;
        diesel::update(sprints.filter(id.eq(sprint_id)))
            .set(changes)
            .returning(Sprint::as_returning())
            .get_result(conn)
    }

    pub fn soft_delete(
        conn: &mut PgConnection,
        sprint_id: uuid::Uuid,
    ) -> Result<Sprint, diesel::result::Error> {
        use crate::schema::sprints::dsl::*;
        diesel::update(sprints.filter(id.eq(sprint_id)))
            .set(is_deleted.eq(true))
            .returning(Sprint::as_returning())
            .get_result(conn)
    }
}

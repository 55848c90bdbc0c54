use diesel::prelude::*;

use crate::db::models::team::{NewTeam, Team, TeamChanges};
use crate::db::soft_delete::Visibility;

pub struct TeamRepo;

impl TeamRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        team_id: uuid::Uuid,
    ) -> Result<Option<Team>, diesel::result::Error> {
        use crate::schema::teams::dsl::*;
        teams.filter(id.eq(team_id)).select(Team::as_select()).first(conn).optional()
    }

    pub fn exists_by_name(
        conn: &mut PgConnection,
        team_name: &str,
        exclude_id: Option<uuid::Uuid>,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::teams::dsl::*;
        let mut query = teams.filter(name.eq(team_name)).into_boxed();
        if let Some(excluded) = exclude_id {
            query = query.filter(id.ne(excluded));
        }
        diesel::select(diesel::dsl::exists(query)).get_result(conn)
    }

    /// Lists teams on one side of the soft-delete flag, optionally restricted
    /// to the given ids.
    pub fn list(
        conn: &mut PgConnection,
        visibility: Visibility,
        team_ids: Option<Vec<uuid::Uuid>>,
    ) -> Result<Vec<Team>, diesel::result::Error> {
        use crate::schema::teams::dsl::*;
        let mut query = teams
            .filter(is_deleted.eq(visibility.is_deleted()))
            .into_boxed();
        if let Some(ids) = team_ids {
            query = query.filter(id.eq_any(ids));
        }
        query.order(created_at.desc()).select(Team::as_select()).load(conn)
    }

    pub fn list_owned_ids(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
    ) -> Result<Vec<uuid::Uuid>, diesel::result::Error> {
        use crate::schema::teams::dsl::*;
        teams
            .filter(owner_id.eq(user_id))
            .filter(is_deleted.eq(false))
            .select(id)
            .load(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_team: &NewTeam,
    ) -> Result<Team, diesel::result::Error> {
        diesel::insert_into(crate::schema::teams::table)
            .values(new_team)
            .returning(Team::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        team_id: uuid::Uuid,
        changes: &TeamChanges,
    ) -> Result<Team, diesel::result::Error> {
        use crate::schema::teams::dsl::*;
        diesel::update(teams.filter(id.eq(team_id)))
            .set(changes)
            .returning(Team::as_returning())
            .get_result(conn)
    }

    pub fn soft_delete(
        conn: &mut PgConnection,
        team_id: uuid::Uuid,
    ) -> Result<Team, diesel::result::Error> {
        use crate::schema::teams::dsl::*;
        diesel::update(teams.filter(id.eq(team_id)))
            .set(is_deleted.eq(true))
            .returning(Team::as_returning())
            .get_result(conn)
    }
}

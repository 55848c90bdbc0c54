use diesel::prelude::*;

use crate::db::models::auth::User;
use crate::db::models::team::{NewTeamMember, TeamMember};

pub struct TeamMemberRepo;

impl TeamMemberRepo {
    pub fn find(
        conn: &mut PgConnection,
        target_team_id: uuid::Uuid,
        target_user_id: uuid::Uuid,
    ) -> Result<Option<TeamMember>, diesel::result::Error> {
        use crate::schema::team_members::dsl::*;
        team_members
            .filter(team_id.eq(target_team_id))
            .filter(user_id.eq(target_user_id))
            .select(TeamMember::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists(
        conn: &mut PgConnection,
        target_team_id: uuid::Uuid,
        target_user_id: uuid::Uuid,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::team_members::dsl::*;
        diesel::select(diesel::dsl::exists(
            team_members
                .filter(team_id.eq(target_team_id))
                .filter(user_id.eq(target_user_id)),
        ))
        .get_result(conn)
    }

    pub fn list_by_team(
        conn: &mut PgConnection,
        target_team_id: uuid::Uuid,
    ) -> Result<Vec<TeamMember>, diesel::result::Error> {
        use crate::schema::team_members::dsl::*;
        team_members
            .filter(team_id.eq(target_team_id))
            .order(joined_at.asc())
            .select(TeamMember::as_select())
            .load(conn)
    }

    pub fn list_with_users(
        conn: &mut PgConnection,
        target_team_id: uuid::Uuid,
    ) -> Result<Vec<(TeamMember, User)>, diesel::result::Error> {
        use crate::schema::{team_members, users};
        team_members::table
            .inner_join(users::table)
            .filter(team_members::team_id.eq(target_team_id))
            .order(team_members::joined_at.asc())
            .select((TeamMember::as_select(), User::as_select()))
            .load(conn)
    }

    pub fn list_team_ids_for_user(
        conn: &mut PgConnection,
        target_user_id: uuid::Uuid,
    ) -> Result<Vec<uuid::Uuid>, diesel::result::Error> {
        use crate::schema::team_members::dsl::*;
        team_members
            .filter(user_id.eq(target_user_id))
            .select(team_id)
            .load(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_member: &NewTeamMember,
    ) -> Result<TeamMember, diesel::result::Error> {
        diesel::insert_into(crate::schema::team_members::table)
            .values(new_member)
            .returning(TeamMember::as_returning())
            .get_result(conn)
    }

    pub fn set_owner_flag(
        conn: &mut PgConnection,
        target_team_id: uuid::Uuid,
        target_user_id: uuid::Uuid,
        owner: bool,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::team_members::dsl::*;
        diesel::update(
            team_members
                .filter(team_id.eq(target_team_id))
                .filter(user_id.eq(target_user_id)),
        )
        .set(is_owner.eq(owner))
        .execute(conn)
    }

    /// Memberships are the one record that is physically removed.
    pub fn delete(
        conn: &mut PgConnection,
        target_team_id: uuid::Uuid,
        target_user_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::team_members::dsl::*;
        diesel::delete(
            team_members
                .filter(team_id.eq(target_team_id))
                .filter(user_id.eq(target_user_id)),
        )
        .execute(conn)
    }
}

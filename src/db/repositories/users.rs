use diesel::prelude::*;

use crate::db::models::auth::{NewUser, User, UserChanges};
use crate::db::soft_delete::Visibility;

pub struct UserRepo;

impl UserRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users.filter(id.eq(user_id)).select(User::as_select()).first(conn).optional()
    }

    pub fn find_by_email(
        conn: &mut PgConnection,
        target_email: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(email.eq(target_email))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_username(
        conn: &mut PgConnection,
        target_username: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(username.eq(target_username))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists_by_email(
        conn: &mut PgConnection,
        target_email: &str,
        exclude_id: Option<uuid::Uuid>,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        let mut query = users.filter(email.eq(target_email)).into_boxed();
        if let Some(excluded) = exclude_id {
            query = query.filter(id.ne(excluded));
        }
        diesel::select(diesel::dsl::exists(query)).get_result(conn)
    }

    pub fn exists_by_username(
        conn: &mut PgConnection,
        target_username: &str,
        exclude_id: Option<uuid::Uuid>,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        let mut query = users.filter(username.eq(target_username)).into_boxed();
        if let Some(excluded) = exclude_id {
            query = query.filter(id.ne(excluded));
        }
        diesel::select(diesel::dsl::exists(query)).get_result(conn)
    }

    pub fn list(
        conn: &mut PgConnection,
        visibility: Visibility,
    ) -> Result<Vec<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(is_deleted.eq(visibility.is_deleted()))
            .order(date_joined.asc())
            .select(User::as_select())
            .load(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_user: &NewUser,
    ) -> Result<User, diesel::result::Error> {
        diesel::insert_into(crate::schema::users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
        changes: &UserChanges,
    ) -> Result<User, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(user_id)))
            .set(changes)
            .returning(User::as_returning())
            .get_result(conn)
    }

    pub fn update_password(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
        new_hash: &str,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(user_id)))
            .set(password_hash.eq(new_hash))
            .execute(conn)
    }

    pub fn set_staff(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
        staff: bool,
    ) -> Result<User, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(user_id)))
            .set(is_staff.eq(staff))
            .returning(User::as_returning())
            .get_result(conn)
    }

    pub fn soft_delete(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
    ) -> Result<User, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(user_id)))
            .set(is_deleted.eq(true))
            .returning(User::as_returning())
            .get_result(conn)
    }
}

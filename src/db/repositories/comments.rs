use diesel::prelude::*;

use crate::db::models::comment::{Comment, NewComment};
use crate::db::soft_delete::Visibility;

pub struct CommentRepo;

impl CommentRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        comment_id: uuid::Uuid,
    ) -> Result<Option<Comment>, diesel::result::Error> {
        use crate::schema::comments::dsl::*;
        comments
            .filter(id.eq(comment_id))
            .select(Comment::as_select())
            .first(conn)
            .optional()
    }

    pub fn list_by_task(
        conn: &mut PgConnection,
        target_task_id: uuid::Uuid,
        visibility: Visibility,
    ) -> Result<Vec<Comment>, diesel::result::Error> {
        use crate::schema::comments::dsl::*;
        comments
            .filter(task_id.eq(target_task_id))
            .filter(is_deleted.eq(visibility.is_deleted()))
            .order(created_at.desc())
            .select(Comment::as_select())
            .load(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_comment: &NewComment,
    ) -> Result<Comment, diesel::result::Error> {
        diesel::insert_into(crate::schema::comments::table)
            .values(new_comment)
            .returning(Comment::as_returning())
            .get_result(conn)
    }

    pub fn update_content(
        conn: &mut PgConnection,
        comment_id: uuid::Uuid,
        new_content: &str,
    ) -> Result<Comment, diesel::result::Error> {
        use crate::schema::comments::dsl::*;
        diesel::update(comments.filter(id.eq(comment_id)))
            .set(content.eq(new_content))
            .returning(Comment::as_returning())
            .get_result(conn)
    }

    pub fn soft_delete(
        conn: &mut PgConnection,
        comment_id: uuid::Uuid,
    ) -> Result<Comment, diesel::result::Error> {
        use crate::schema::comments::dsl::*;
        diesel::update(comments.filter(id.eq(comment_id)))
            .set(is_deleted.eq(true))
            .returning(Comment::as_returning())
            .get_result(conn)
    }
}

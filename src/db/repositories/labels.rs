use diesel::prelude::*;

use crate::db::models::label::{Label, NewLabel};
use crate::db::soft_delete::Visibility;

pub struct LabelRepo;

impl LabelRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        label_id: uuid::Uuid,
    ) -> Result<Option<Label>, diesel::result::Error> {
        use crate::schema::labels::dsl::*;
        labels.filter(id.eq(label_id)).select(Label::as_select()).first(conn).optional()
    }

    /// Name clash among active labels only; archived names may be reused.
    pub fn exists_by_name(
        conn: &mut PgConnection,
        label_name: &str,
        exclude_id: Option<uuid::Uuid>,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::labels::dsl::*;
        let mut query = labels
            .filter(name.eq(label_name))
            .filter(is_deleted.eq(false))
            .into_boxed();
        if let Some(excluded) = exclude_id {
            query = query.filter(id.ne(excluded));
        }
        diesel::select(diesel::dsl::exists(query)).get_result(conn)
    }

    pub fn list(
        conn: &mut PgConnection,
        visibility: Visibility,
    ) -> Result<Vec<Label>, diesel::result::Error> {
        use crate::schema::labels::dsl::*;
        labels
            .filter(is_deleted.eq(visibility.is_deleted()))
            .order(name.asc())
            .select(Label::as_select())
            .load(conn)
    }

    /// Active labels linked to a task through active task-label rows.
    pub fn list_for_task(
        conn: &mut PgConnection,
        task_id: uuid::Uuid,
    ) -> Result<Vec<Label>, diesel::result::Error> {
        use crate::schema::{labels, task_labels};
        task_labels::table
            .inner_join(labels::table)
            .filter(task_labels::task_id.eq(task_id))
            .filter(task_labels::is_deleted.eq(false))
            .filter(labels::is_deleted.eq(false))
            .order(labels::name.asc())
            .select(Label::as_select())
            .load(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_label: &NewLabel,
    ) -> Result<Label, diesel::result::Error> {
        diesel::insert_into(crate::schema::labels::table)
            .values(new_label)
            .returning(Label::as_returning())
            .get_result(conn)
    }

    pub fn rename(
        conn: &mut PgConnection,
        label_id: uuid::Uuid,
        new_name: &str,
    ) -> Result<Label, diesel::result::Error> {
        use crate::schema::labels::dsl::*;
        diesel::update(labels.filter(id.eq(label_id)))
            .set(name.eq(new_name))
            .returning(Label::as_returning())
            .get_result(conn)
    }

    pub fn soft_delete(
        conn: &mut PgConnection,
        label_id: uuid::Uuid,
    ) -> Result<Label, diesel::result::Error> {
        use crate::schema::labels::dsl::*;
        diesel::update(labels.filter(id.eq(label_id)))
            .set(is_deleted.eq(true))
            .returning(Label::as_returning())
            .get_result(conn)
    }
}

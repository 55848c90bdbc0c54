use diesel::prelude::*;

use crate::db::enums::TaskStatus;
use crate::db::models::task::{NewTask, Task, TaskChanges};
use crate::db::soft_delete::Visibility;

pub struct TaskRepo;

impl TaskRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        task_id: uuid::Uuid,
    ) -> Result<Option<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        tasks.filter(id.eq(task_id)).select(Task::as_select()).first(conn).optional()
    }

    /// Team that owns the task: tasks -> sprints -> projects -> workspaces.
    /// Parent soft-delete flags are not consulted.
    pub fn owning_team_id(
        conn: &mut PgConnection,
        task_id: uuid::Uuid,
    ) -> Result<Option<uuid::Uuid>, diesel::result::Error> {
        use crate::schema::{projects, sprints, tasks, workspaces};
        tasks::table
            .inner_join(sprints::table.inner_join(projects::table.inner_join(workspaces::table)))
            .filter(tasks::id.eq(task_id))
            .select(workspaces::team_id)
            .first(conn)
            .optional()
    }

    pub fn list_by_sprint(
        conn: &mut PgConnection,
        target_sprint_id: uuid::Uuid,
        visibility: Visibility,
        target_status: Option<TaskStatus>,
    ) -> Result<Vec<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        let mut query = tasks
            .filter(sprint_id.eq(target_sprint_id))
            .filter(is_deleted.eq(visibility.is_deleted()))
            .into_boxed();
        if let Some(wanted) = target_status {
            query = query.filter(status.eq(wanted));
        }
        query.order(created_at.asc()).select(Task::as_select()).load(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_task: &NewTask,
    ) -> Result<Task, diesel::result::Error> {
        diesel::insert_into(crate::schema::tasks::table)
            .values(new_task)
            .returning(Task::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        task_id: uuid::Uuid,
        changes: &TaskChanges,
    ) -> Result<Task, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        diesel::update(tasks.filter(id.eq(task_id)))
            .set(changes)
            .returning(Task::as_returning())
            .get_result(conn)
    }

    pub fn assign(
        conn: &mut PgConnection,
        task_id: uuid::Uuid,
        assignee: Option<uuid::Uuid>,
    ) -> Result<Task, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        diesel::update(tasks.filter(id.eq(task_id)))
            .set(user_id.eq(assignee))
            .returning(Task::as_returning())
            .get_result(conn)
    }

    pub fn soft_delete(
        conn: &mut PgConnection,
        task_id: uuid::Uuid,
    ) -> Result<Task, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        diesel::update(tasks.filter(id.eq(task_id)))
            .set(is_deleted.eq(true))
            .returning(Task::as_returning())
            .get_result(conn)
    }
}

// Storage tests run inside a rolled-back transaction against DATABASE_URL

use chrono::{Duration, Utc};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{Connection, PgConnection};
use uuid::Uuid;
use vazifeban::{
    db::{
        enums::TaskStatus,
        models::{
            CreateAttachmentRequest, CreateCommentRequest, CreateLabelRequest,
            CreateProjectRequest, CreateSprintRequest, CreateTaskRequest, CreateTeamRequest,
            CreateWorkspaceRequest, NewLabel, NewTaskLabel, NewUser, User,
        },
        repositories::{
            AttachmentRepo, CommentRepo, LabelRepo, ProjectRepo, SprintRepo, TaskLabelRepo,
            TaskRepo, UserRepo, WorkTimeRepo, WorkspaceRepo,
        },
    },
    error::AppError,
    services::{
        AttachmentsService, CommentsService, LabelsService, ProjectsService, SprintsService,
        TasksService, TeamMembersService, TeamsService, WorkTimesService, WorkspacesService,
        context::RequestContext,
    },
};

fn connection() -> PgConnection {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let mut conn = PgConnection::establish(&url).expect("database connection");
    conn.begin_test_transaction().expect("test transaction");
    conn
}

fn user(conn: &mut PgConnection, username: &str) -> User {
    UserRepo::insert(
        conn,
        &NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            is_staff: false,
            is_superuser: false,
            is_student: false,
            student_number: None,
        },
    )
    .unwrap()
}

fn ctx(user: &User) -> RequestContext {
    RequestContext {
        user_id: user.id,
        is_staff: false,
        is_superuser: false,
    }
}

struct Tree {
    team_id: Uuid,
    workspace_id: Uuid,
    project_id: Uuid,
    sprint_id: Uuid,
    task_id: Uuid,
}

/// Team -> workspace -> project -> sprint -> task, all owned by `owner`.
fn task_tree(conn: &mut PgConnection, owner: &User) -> Tree {
    let actor = ctx(owner);
    let team = TeamsService::create(
        conn,
        &actor,
        &CreateTeamRequest {
            name: format!("team-{}", owner.username),
            description: String::new(),
        },
    )
    .unwrap();

    let workspace = WorkspacesService::create(
        conn,
        &actor,
        &CreateWorkspaceRequest {
            team_id: team.id,
            title: "Roadmap".to_string(),
        },
    )
    .unwrap();

    let now = Utc::now();
    let project = ProjectsService::create(
        conn,
        &actor,
        &CreateProjectRequest {
            workspace_id: workspace.id,
            title: "Checkout".to_string(),
            description: String::new(),
            started_at: Some(now),
            ended_at: now + Duration::days(60),
            deadline: now + Duration::days(45),
        },
    )
    .unwrap();

    let sprint = SprintsService::create(
        conn,
        &actor,
        &CreateSprintRequest {
            project_id: project.id,
            started_at: Some(now),
            ended_at: now + Duration::days(14),
        },
    )
    .unwrap();

    let task = TasksService::create(
        conn,
        &actor,
        &CreateTaskRequest {
            sprint_id: sprint.id,
            title: "Payment form".to_string(),
            description: String::new(),
            status: TaskStatus::ToDo,
            deadline: None,
            user_id: None,
        },
    )
    .unwrap();

    Tree {
        team_id: team.id,
        workspace_id: workspace.id,
        project_id: project.id,
        sprint_id: sprint.id,
        task_id: task.id,
    }
}

#[test]
#[ignore = "requires database"]
fn outsiders_cannot_read_tasks_until_added_to_the_team() {
    let mut conn = connection();
    let owner = user(&mut conn, "owner1");
    let outsider = user(&mut conn, "outsider1");
    let Tree { team_id, task_id, .. } = task_tree(&mut conn, &owner);

    let denied = TasksService::get(&mut conn, &ctx(&outsider), task_id);
    assert!(matches!(denied, Err(AppError::Forbidden { .. })));

    let denied = WorkspacesService::create(
        &mut conn,
        &ctx(&outsider),
        &CreateWorkspaceRequest {
            team_id,
            title: "W".to_string(),
        },
    );
    assert!(matches!(denied, Err(AppError::Forbidden { .. })));

    TeamMembersService::add(&mut conn, &ctx(&owner), team_id, outsider.id).unwrap();
    let detail = TasksService::get(&mut conn, &ctx(&outsider), task_id).unwrap();
    assert_eq!(detail.task.id, task_id);
}

#[test]
#[ignore = "requires database"]
fn membership_is_unique_per_team() {
    let mut conn = connection();
    let owner = user(&mut conn, "owner2");
    let member = user(&mut conn, "member2");
    let team_id = task_tree(&mut conn, &owner).team_id;

    TeamMembersService::add(&mut conn, &ctx(&owner), team_id, member.id).unwrap();
    let err = TeamMembersService::add(&mut conn, &ctx(&owner), team_id, member.id).unwrap_err();
    assert_eq!(err.field_name(), Some("user_id"));
}

#[test]
#[ignore = "requires database"]
fn deleted_tasks_move_to_the_archive() {
    let mut conn = connection();
    let owner = user(&mut conn, "owner3");
    let Tree { sprint_id, task_id, .. } = task_tree(&mut conn, &owner);
    let actor = ctx(&owner);

    TasksService::delete(&mut conn, &actor, task_id).unwrap();

    assert!(matches!(
        TasksService::get(&mut conn, &actor, task_id),
        Err(AppError::NotFound { .. })
    ));

    let listed = SprintsService::list_tasks(&mut conn, &actor, sprint_id, None).unwrap();
    assert!(listed.iter().all(|task| task.id != task_id));

    let row = TaskRepo::find_by_id(&mut conn, task_id).unwrap().unwrap();
    assert!(row.is_deleted);

    let archived = TasksService::list_archived(&mut conn, &actor, sprint_id).unwrap();
    assert!(archived.iter().any(|task| task.id == task_id && task.is_deleted));
}

#[test]
#[ignore = "requires database"]
fn team_owner_cannot_leave_without_transferring_ownership() {
    let mut conn = connection();
    let owner = user(&mut conn, "owner4");
    let team_id = task_tree(&mut conn, &owner).team_id;

    let err = TeamMembersService::remove(&mut conn, &ctx(&owner), team_id, owner.id).unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
}

#[test]
#[ignore = "requires database"]
fn completing_a_closed_work_time_leaves_it_untouched() {
    let mut conn = connection();
    let owner = user(&mut conn, "owner5");
    let task_id = task_tree(&mut conn, &owner).task_id;
    let actor = ctx(&owner);

    let started = Utc::now() - Duration::hours(3);
    let open = WorkTimesService::start(&mut conn, &actor, task_id, Some(started)).unwrap();
    assert!(open.ended_at.is_none());

    let first_end = started + Duration::hours(1);
    let closed = WorkTimesService::complete(&mut conn, &actor, open.id, Some(first_end)).unwrap();
    assert!(closed.ended_at.is_some());

    let err = WorkTimesService::complete(&mut conn, &actor, open.id, Some(Utc::now())).unwrap_err();
    assert_eq!(err.field_name(), Some("ended_at"));

    let reloaded = WorkTimesService::get(&mut conn, &actor, open.id).unwrap();
    assert_eq!(reloaded.ended_at, closed.ended_at);
}

#[test]
#[ignore = "requires database"]
fn deleted_workspaces_move_to_the_archive() {
    let mut conn = connection();
    let owner = user(&mut conn, "owner6");
    let workspace_id = task_tree(&mut conn, &owner).workspace_id;
    let actor = ctx(&owner);

    WorkspacesService::delete(&mut conn, &actor, workspace_id).unwrap();

    let listed = WorkspacesService::list(&mut conn, &actor).unwrap();
    assert!(listed.iter().all(|w| w.id != workspace_id));
    assert!(matches!(
        WorkspacesService::get(&mut conn, &actor, workspace_id),
        Err(AppError::NotFound { .. })
    ));

    let row = WorkspaceRepo::find_by_id(&mut conn, workspace_id).unwrap().unwrap();
    assert!(row.is_deleted);

    let archived = WorkspacesService::list_archived(&mut conn, &actor).unwrap();
    assert!(archived.iter().any(|w| w.id == workspace_id));
}

#[test]
#[ignore = "requires database"]
fn deleted_projects_move_to_the_archive() {
    let mut conn = connection();
    let owner = user(&mut conn, "owner7");
    let project_id = task_tree(&mut conn, &owner).project_id;
    let actor = ctx(&owner);

    ProjectsService::delete(&mut conn, &actor, project_id).unwrap();

    let listed = ProjectsService::list(&mut conn, &actor).unwrap();
    assert!(listed.iter().all(|p| p.id != project_id));

    let row = ProjectRepo::find_by_id(&mut conn, project_id).unwrap().unwrap();
    assert!(row.is_deleted);

    let archived = ProjectsService::list_archived(&mut conn, &actor).unwrap();
    assert!(archived.iter().any(|p| p.id == project_id));
}

#[test]
#[ignore = "requires database"]
fn deleted_sprints_move_to_the_archive() {
    let mut conn = connection();
    let owner = user(&mut conn, "owner8");
    let Tree { project_id, sprint_id, .. } = task_tree(&mut conn, &owner);
    let actor = ctx(&owner);

    SprintsService::delete(&mut conn, &actor, sprint_id).unwrap();

    let listed = ProjectsService::list_sprints(&mut conn, &actor, project_id, None).unwrap();
    assert!(listed.iter().all(|s| s.id != sprint_id));

    let row = SprintRepo::find_by_id(&mut conn, sprint_id).unwrap().unwrap();
    assert!(row.is_deleted);

    let archived = SprintsService::list_archived(&mut conn, &actor).unwrap();
    assert!(archived.iter().any(|s| s.id == sprint_id));
}

#[test]
#[ignore = "requires database"]
fn deleted_labels_leave_the_default_listing() {
    let mut conn = connection();
    let owner = user(&mut conn, "owner9");
    let actor = ctx(&owner);

    let label = LabelsService::create(
        &mut conn,
        &actor,
        &CreateLabelRequest {
            name: "storage-regression".to_string(),
        },
    )
    .unwrap();
    LabelsService::delete(&mut conn, &actor, label.id).unwrap();

    let listed = LabelsService::list(&mut conn).unwrap();
    assert!(listed.iter().all(|l| l.id != label.id));

    let row = LabelRepo::find_by_id(&mut conn, label.id).unwrap().unwrap();
    assert!(row.is_deleted);
}

#[test]
#[ignore = "requires database"]
fn deleted_task_children_leave_their_listings() {
    let mut conn = connection();
    let owner = user(&mut conn, "owner10");
    let task_id = task_tree(&mut conn, &owner).task_id;
    let actor = ctx(&owner);

    let comment = CommentsService::create(
        &mut conn,
        &actor,
        &CreateCommentRequest {
            task_id,
            content: "Blocked on review".to_string(),
        },
    )
    .unwrap();
    let attachment = AttachmentsService::create(
        &mut conn,
        &actor,
        &CreateAttachmentRequest {
            task_id,
            file_name: "notes.txt".to_string(),
            content_type: "text/plain".to_string(),
            content_base64: "aGVsbG8=".to_string(),
        },
        1024,
    )
    .unwrap();
    let work_time = WorkTimesService::start(&mut conn, &actor, task_id, None).unwrap();

    CommentsService::delete(&mut conn, &actor, comment.id).unwrap();
    AttachmentsService::delete(&mut conn, &actor, attachment.id).unwrap();
    WorkTimesService::delete(&mut conn, &actor, work_time.id).unwrap();

    let comments = CommentsService::list_by_task(&mut conn, &actor, task_id).unwrap();
    assert!(comments.iter().all(|c| c.id != comment.id));
    let attachments = AttachmentsService::list_by_task(&mut conn, &actor, task_id).unwrap();
    assert!(attachments.iter().all(|a| a.id != attachment.id));
    let work_times = WorkTimesService::list_by_task(&mut conn, &actor, task_id).unwrap();
    assert!(work_times.iter().all(|w| w.id != work_time.id));

    assert!(CommentRepo::find_by_id(&mut conn, comment.id).unwrap().unwrap().is_deleted);
    assert!(AttachmentRepo::find_by_id(&mut conn, attachment.id).unwrap().unwrap().is_deleted);
    assert!(WorkTimeRepo::find_by_id(&mut conn, work_time.id).unwrap().unwrap().is_deleted);
}

#[test]
#[ignore = "requires database"]
fn label_names_are_unique_among_active_labels() {
    let mut conn = connection();
    let owner = user(&mut conn, "owner11");
    let actor = ctx(&owner);
    let request = CreateLabelRequest {
        name: "storage-urgent".to_string(),
    };

    let first = LabelsService::create(&mut conn, &actor, &request).unwrap();
    LabelsService::delete(&mut conn, &actor, first.id).unwrap();
    LabelsService::create(&mut conn, &actor, &request).unwrap();

    // Skips the service pre-check, so only the index can reject it.
    let err = LabelRepo::insert(
        &mut conn,
        &NewLabel {
            name: "storage-urgent".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    ));
    let mapped = AppError::unique_violation(err, "name", "Label with this name already exists");
    assert_eq!(mapped.field_name(), Some("name"));
}

#[test]
#[ignore = "requires database"]
fn a_label_is_attached_to_a_task_at_most_once() {
    let mut conn = connection();
    let owner = user(&mut conn, "owner12");
    let task_id = task_tree(&mut conn, &owner).task_id;
    let actor = ctx(&owner);

    let label = LabelsService::create(
        &mut conn,
        &actor,
        &CreateLabelRequest {
            name: "storage-backend".to_string(),
        },
    )
    .unwrap();
    TasksService::attach_label(&mut conn, &actor, task_id, label.id).unwrap();

    let link = NewTaskLabel {
        label_id: Some(label.id),
        task_id: Some(task_id),
    };
    let err = TaskLabelRepo::insert(&mut conn, &link).unwrap_err();
    assert!(matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    ));
}

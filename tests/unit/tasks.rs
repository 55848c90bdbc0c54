use serde_json::json;
use vazifeban::db::{
    enums::TaskStatus,
    models::{CreateTaskRequest, TaskChanges, UpdateTaskRequest},
};

#[test]
fn create_task_defaults_status_and_description() {
    let req: CreateTaskRequest = serde_json::from_value(json!({
        "sprint_id": "6f1c1a5e-2b8b-4c1e-9a51-0c2a1f0e9b11",
        "title": "Write migration"
    }))
    .unwrap();

    assert_eq!(req.status, TaskStatus::ToDo);
    assert!(req.description.is_empty());
    assert!(req.user_id.is_none());
}

#[test]
fn unknown_status_is_rejected_at_deserialization() {
    let result = serde_json::from_value::<UpdateTaskRequest>(json!({ "status": "Blocked" }));
    assert!(result.is_err());
}

#[test]
fn status_only_update_touches_status() {
    let req = UpdateTaskRequest {
        status: Some(TaskStatus::Done),
        ..Default::default()
    };
    let changes = TaskChanges::from(&req);
    assert_eq!(changes.status, Some(TaskStatus::Done));
    assert!(changes.title.is_none());
    assert!(changes.deadline.is_none());
    assert!(!changes.is_empty());

    assert!(TaskChanges::from(&UpdateTaskRequest::default()).is_empty());
}

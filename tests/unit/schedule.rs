use chrono::{Duration, Utc};
use uuid::Uuid;
use vazifeban::{
    db::{
        enums::SprintState,
        models::{ProjectChanges, Sprint, UpdateProjectRequest},
    },
    validation::schedule::{validate_title, validate_window},
};

fn sprint(ends_in: Duration) -> Sprint {
    let now = Utc::now();
    Sprint {
        id: Uuid::new_v4(),
        project_id: Uuid::new_v4(),
        started_at: now - Duration::days(7),
        ended_at: now + ends_in,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn sprint_state_follows_end_time() {
    let now = Utc::now();
    assert_eq!(sprint(Duration::days(3)).state_at(now), SprintState::Active);
    assert_eq!(sprint(Duration::days(-1)).state_at(now), SprintState::Completed);
}

#[test]
fn windows_reject_end_before_start() {
    let start = Utc::now();
    assert!(validate_window(start, start + Duration::days(14), "ended_at").is_ok());
    let err = validate_window(start, start - Duration::days(1), "deadline").unwrap_err();
    assert_eq!(err.field_name(), Some("deadline"));
}

#[test]
fn blank_titles_are_rejected() {
    assert!(validate_title("Release 1.2").is_ok());
    assert_eq!(validate_title("  ").unwrap_err().field_name(), Some("title"));
}

#[test]
fn empty_project_update_produces_no_changes() {
    let changes = ProjectChanges::from(&UpdateProjectRequest::default());
    assert!(changes.is_empty());

    let req = UpdateProjectRequest {
        title: Some("Billing v2".to_string()),
        ..Default::default()
    };
    assert!(!ProjectChanges::from(&req).is_empty());
}

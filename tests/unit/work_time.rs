use chrono::{Duration, Utc};
use uuid::Uuid;
use vazifeban::{
    db::models::WorkTime,
    validation::{attachment::decode_content, work_time::validate_completion},
};

fn interval(ended: bool) -> WorkTime {
    let started_at = Utc::now() - Duration::hours(1);
    WorkTime {
        id: Uuid::new_v4(),
        task_id: Uuid::new_v4(),
        started_at,
        ended_at: ended.then(|| started_at + Duration::minutes(30)),
        is_deleted: false,
        created_at: started_at,
    }
}

#[test]
fn open_interval_completes_once() {
    let open = interval(false);
    assert!(open.is_open());
    assert!(validate_completion(&open, Utc::now()).is_ok());

    let closed = interval(true);
    assert!(!closed.is_open());
    assert_eq!(
        validate_completion(&closed, Utc::now()).unwrap_err().field_name(),
        Some("ended_at")
    );
}

#[test]
fn completion_cannot_precede_start() {
    let open = interval(false);
    assert!(validate_completion(&open, open.started_at - Duration::seconds(1)).is_err());
}

#[test]
fn attachment_content_is_size_limited() {
    // "hello world"
    let encoded = "aGVsbG8gd29ybGQ=";
    assert_eq!(decode_content(encoded, 1024).unwrap(), b"hello world");
    assert!(decode_content(encoded, 4).is_err());
    assert!(decode_content("not base64!", 1024).is_err());
}

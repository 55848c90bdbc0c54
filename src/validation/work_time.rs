use chrono::{DateTime, Utc};

use crate::db::models::work_time::{CompleteWorkTimeRequest, WorkTime};
use crate::error::AppError;

/// Reads a completion body. Only an absent or blank body means "now"; anything
/// else must parse.
pub fn parse_completion_body(body: &[u8]) -> Result<CompleteWorkTimeRequest, AppError> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(CompleteWorkTimeRequest::default());
    }

    serde_json::from_slice(body).map_err(|err| {
        if err.is_data() {
            AppError::field("ended_at", format!("Invalid end time: {}", err))
        } else {
            AppError::validation(format!("Malformed request body: {}", err))
        }
    })
}

/// Checks that `end` may close this interval.
pub fn validate_completion(work_time: &WorkTime, end: DateTime<Utc>) -> Result<(), AppError> {
    if !work_time.is_open() {
        return Err(AppError::field("ended_at", "Work time is already completed"));
    }

    if end < work_time.started_at {
        return Err(AppError::field(
            "ended_at",
            "End time cannot be before start time",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn open_interval() -> WorkTime {
        WorkTime {
            id: Uuid::new_v4(),
            task_id: Uuid::new_v4(),
            started_at: Utc::now() - Duration::hours(2),
            ended_at: None,
            is_deleted: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn blank_completion_body_means_now() {
        assert!(parse_completion_body(b"").unwrap().ended_at.is_none());
        assert!(parse_completion_body(b"  \n").unwrap().ended_at.is_none());
        assert!(parse_completion_body(b"{}").unwrap().ended_at.is_none());
    }

    #[test]
    fn completion_body_with_end_time_parses() {
        let parsed = parse_completion_body(br#"{"ended_at":"2024-05-01T10:30:00Z"}"#).unwrap();
        assert_eq!(
            parsed.ended_at.map(|t| t.to_rfc3339()),
            Some("2024-05-01T10:30:00+00:00".to_string())
        );
    }

    #[test]
    fn bad_end_time_is_a_field_error() {
        let err = parse_completion_body(br#"{"ended_at":"yesterday-ish"}"#).unwrap_err();
        assert_eq!(err.field_name(), Some("ended_at"));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_completion_body_is_rejected() {
        let err = parse_completion_body(b"{\"ended_at\": ").unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn open_interval_can_be_closed() {
        let wt = open_interval();
        assert!(validate_completion(&wt, Utc::now()).is_ok());
    }

    #[test]
    fn closed_interval_is_rejected() {
        let mut wt = open_interval();
        wt.ended_at = Some(Utc::now());
        assert!(matches!(
            validate_completion(&wt, Utc::now()),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let wt = open_interval();
        let end = wt.started_at - Duration::minutes(5);
        assert!(validate_completion(&wt, end).is_err());
    }
}

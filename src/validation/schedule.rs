use chrono::{DateTime, Utc};

use crate::error::AppError;

/// Rejects an interval whose end precedes its start.
pub fn validate_window(
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    field: &str,
) -> Result<(), AppError> {
    if ended_at < started_at {
        return Err(AppError::field(field, "End time cannot be before start time"));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::field("title", "Title cannot be blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn window_must_not_run_backwards() {
        let start = Utc::now();
        assert!(validate_window(start, start, "ended_at").is_ok());
        assert!(validate_window(start, start + Duration::days(14), "ended_at").is_ok());

        let err = validate_window(start, start - Duration::seconds(1), "ended_at").unwrap_err();
        assert_eq!(err.field_name(), Some("ended_at"));
    }
}

use crate::db::models::api::{ApiResponse, ErrorDetail};
use axum::{Json, http::StatusCode, response::IntoResponse};
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Authentication error: {message}")]
    Auth { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Validation failed with {} errors", .0.len())]
    InvalidFields(Vec<ErrorDetail>),

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Auth { .. } | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Validation { .. } | AppError::InvalidFields(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Config(_)
            | AppError::Bcrypt(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let response = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                ApiResponse::<()>::internal_error("Database error")
            }
            AppError::Pool(ref e) => {
                tracing::error!("Connection pool error: {}", e);
                ApiResponse::<()>::internal_error("Connection error")
            }
            AppError::Auth { ref message } => ApiResponse::<()>::unauthorized(message),
            AppError::Forbidden { ref message } => ApiResponse::<()>::forbidden(message),
            AppError::Validation {
                ref message,
                ref field,
            } => ApiResponse::<()>::validation_error(vec![ErrorDetail {
                field: field.clone(),
                code: "INVALID".to_string(),
                message: message.clone(),
            }]),
            AppError::InvalidFields(errors) => ApiResponse::<()>::validation_error(errors),
            AppError::NotFound { ref resource } => {
                ApiResponse::<()>::not_found(&format!("{} not found", resource))
            }
            AppError::Config(ref e) => {
                tracing::error!("Configuration error: {}", e);
                ApiResponse::<()>::internal_error("Configuration error")
            }
            AppError::Jwt(ref e) => {
                tracing::warn!("JWT error: {}", e);
                ApiResponse::<()>::unauthorized("Invalid token")
            }
            AppError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {}", e);
                ApiResponse::<()>::internal_error("Password processing error")
            }
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                ApiResponse::<()>::internal_error(message)
            }
        };

        (status, Json(response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Turns a unique-constraint violation into a field-level validation
    /// error; every other database error passes through unchanged.
    pub fn unique_violation(
        err: diesel::result::Error,
        field: &str,
        message: &str,
    ) -> Self {
        match err {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                Self::field(field, message)
            }
            other => Self::Database(other),
        }
    }

    /// Like `unique_violation`, but picks the field from the violated constraint.
    /// `targets` holds `(constraint, field, message)`; the first entry is used
    /// when no constraint name matches.
    pub fn unique_violation_by_constraint(
        err: diesel::result::Error,
        targets: &[(&str, &str, &str)],
    ) -> Self {
        match err {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                let constraint = info.constraint_name().unwrap_or_default();
                match targets
                    .iter()
                    .find(|(name, _, _)| *name == constraint)
                    .or_else(|| targets.first())
                {
                    Some((_, field, message)) => Self::field(*field, *message),
                    None => Self::validation(info.message().to_string()),
                }
            }
            other => Self::Database(other),
        }
    }

    /// Field name carried by a validation error, if any.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            AppError::Validation { field, .. } => field.as_deref(),
            AppError::InvalidFields(errors) => errors.first().and_then(|e| e.field.as_deref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(AppError::auth("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::not_found("task").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unique_violation_maps_to_field_error() {
        let err = diesel::result::Error::NotFound;
        let mapped = AppError::unique_violation(err, "name", "taken");
        assert!(matches!(mapped, AppError::Database(_)));

        let field_err = AppError::field("email", "Email already exists");
        assert_eq!(field_err.field_name(), Some("email"));
    }

    struct ConstraintInfo(&'static str);

    impl diesel::result::DatabaseErrorInformation for ConstraintInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("users")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some(self.0)
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn duplicate(constraint: &'static str) -> diesel::result::Error {
        diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(ConstraintInfo(constraint)),
        )
    }

    const USER_TARGETS: &[(&str, &str, &str)] = &[
        ("users_username_key", "username", "Username already exists"),
        ("users_email_key", "email", "Email already exists"),
    ];

    #[test]
    fn duplicate_email_is_reported_on_email() {
        let mapped = AppError::unique_violation_by_constraint(duplicate("users_email_key"), USER_TARGETS);
        assert_eq!(mapped.field_name(), Some("email"));
        assert_eq!(mapped.to_string(), "Validation error: Email already exists");
    }

    #[test]
    fn duplicate_username_is_reported_on_username() {
        let mapped =
            AppError::unique_violation_by_constraint(duplicate("users_username_key"), USER_TARGETS);
        assert_eq!(mapped.field_name(), Some("username"));
    }

    #[test]
    fn unknown_constraint_falls_back_to_first_target() {
        let mapped = AppError::unique_violation_by_constraint(duplicate("other_key"), USER_TARGETS);
        assert_eq!(mapped.field_name(), Some("username"));

        let mapped =
            AppError::unique_violation_by_constraint(diesel::result::Error::NotFound, USER_TARGETS);
        assert!(matches!(mapped, AppError::Database(_)));
    }

    #[test]
    fn into_response_uses_status_code() {
        let response = AppError::forbidden("nope").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = AppError::field("confirm_password", "mismatch").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

pub mod attachment;
pub mod auth;
pub mod comment;
pub mod label;
pub mod schedule;
pub mod work_time;

use axum::{Json, async_trait, extract::FromRequest, http::Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::{db::models::api::ErrorDetail, error::AppError};

/// JSON extractor that runs `validator` rules before the handler sees the body.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(
        req: Request<axum::body::Body>,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| AppError::InvalidFields(error_details(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flattens `validator` output into envelope error entries, sorted by field so
/// responses are stable.
pub fn error_details(errors: &ValidationErrors) -> Vec<ErrorDetail> {
    let mut details: Vec<ErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| ErrorDetail {
                field: Some(field.to_string()),
                code: error.code.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field: {}", field)),
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse};

    use crate::db::models::{
        auth::RefreshTokenRequest, sprint::CreateSprintRequest, team::AddTeamMemberRequest,
    };

    fn json_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_field_is_a_bad_request_envelope() {
        let req = json_request(r#"{"project_id":"7f1d4d1e-8a1c-4a55-9c55-3f4b1e2a9d10"}"#);
        let err = ValidatedJson::<CreateSprintRequest>::from_request(req, &())
            .await
            .err()
            .unwrap();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_type_is_a_bad_request_envelope() {
        let req = json_request(r#"{"user_id": 42}"#);
        let err = ValidatedJson::<AddTeamMemberRequest>::from_request(req, &())
            .await
            .err()
            .unwrap();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn field_rules_run_after_parsing() {
        let req = json_request(r#"{"refresh_token": ""}"#);
        let err = ValidatedJson::<RefreshTokenRequest>::from_request(req, &())
            .await
            .err()
            .unwrap();

        assert_eq!(err.field_name(), Some("refresh_token"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn valid_body_passes_through() {
        let req = json_request(
            r#"{"project_id":"7f1d4d1e-8a1c-4a55-9c55-3f4b1e2a9d10","ended_at":"2024-06-01T00:00:00Z"}"#,
        );
        let ValidatedJson(payload) = ValidatedJson::<CreateSprintRequest>::from_request(req, &())
            .await
            .map_err(|_| "rejected")
            .unwrap();

        assert!(payload.started_at.is_none());
    }
}

/// Custom rules referenced from `#[validate(custom(...))]` attributes.
pub mod rules {
    use validator::ValidationError;

    fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
        let mut error = ValidationError::new(code);
        error.message = Some(message.into());
        error
    }

    /// At least 8 characters and three of: lowercase, uppercase, digit, symbol.
    pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
        if password.chars().count() < 8 {
            return Err(rule_error(
                "password_too_short",
                "Password must be at least 8 characters",
            ));
        }

        let classes = [
            password.chars().any(|c| c.is_lowercase()),
            password.chars().any(|c| c.is_uppercase()),
            password.chars().any(|c| c.is_numeric()),
            password
                .chars()
                .any(|c| "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c)),
        ];

        if classes.iter().filter(|present| **present).count() < 3 {
            return Err(rule_error(
                "weak_password",
                "Password must mix lowercase, uppercase, digits or symbols",
            ));
        }

        Ok(())
    }

    pub fn validate_username_format(username: &str) -> Result<(), ValidationError> {
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.' || c == '@' || c == '+')
        {
            return Err(rule_error(
                "invalid_username_format",
                "Username may only contain letters, digits and @/./+/-/_",
            ));
        }

        if username.chars().next().is_some_and(|c| c.is_numeric()) {
            return Err(rule_error(
                "username_starts_with_number",
                "Username cannot start with a digit",
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn password_strength() {
            assert!(validate_password_strength("Secret123").is_ok());
            assert!(validate_password_strength("secret-pass1").is_ok());
            assert!(validate_password_strength("short1A").is_err());
            assert!(validate_password_strength("alllowercase").is_err());
        }

        #[test]
        fn username_format() {
            assert!(validate_username_format("ali.rezaei").is_ok());
            assert!(validate_username_format("user_name-1").is_ok());
            assert!(validate_username_format("1user").is_err());
            assert!(validate_username_format("bad name").is_err());
        }
    }
}

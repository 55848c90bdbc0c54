use serde::Serialize;

// Unified response envelope
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
}

impl ResponseMeta {
    pub fn count(total: usize) -> Self {
        Self {
            total_count: Some(total as i64),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    fn build(
        success: bool,
        code: u16,
        message: &str,
        data: Option<T>,
        errors: Option<Vec<ErrorDetail>>,
    ) -> Self {
        Self {
            success,
            code,
            message: message.to_string(),
            data,
            meta: None,
            errors,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn failure(code: u16, error_code: &str, message: &str) -> Self {
        Self::build(
            false,
            code,
            message,
            None,
            Some(vec![ErrorDetail {
                field: None,
                code: error_code.to_string(),
                message: message.to_string(),
            }]),
        )
    }

    pub fn success(data: T, message: &str) -> Self {
        Self::build(true, 200, message, Some(data), None)
    }

    pub fn success_with_meta(data: T, message: &str, meta: ResponseMeta) -> Self {
        let mut response = Self::build(true, 200, message, Some(data), None);
        response.meta = Some(meta);
        response
    }

    pub fn created(data: T, message: &str) -> Self {
        Self::build(true, 201, message, Some(data), None)
    }

    pub fn ok(message: &str) -> Self {
        Self::build(true, 200, message, None, None)
    }

    pub fn validation_error(errors: Vec<ErrorDetail>) -> Self {
        let message = errors
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "Validation failed".to_string());
        Self::build(false, 400, &message, None, Some(errors))
    }

    pub fn bad_request(message: &str) -> Self {
        Self::failure(400, "BAD_REQUEST", message)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::failure(401, "UNAUTHORIZED", message)
    }

    pub fn forbidden(message: &str) -> Self {
        Self::failure(403, "FORBIDDEN", message)
    }

    pub fn not_found(message: &str) -> Self {
        Self::failure(404, "NOT_FOUND", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::failure(500, "INTERNAL_ERROR", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_envelope_carries_data() {
        let response = ApiResponse::created(42, "Task created successfully");
        assert!(response.success);
        assert_eq!(response.code, 201);
        assert_eq!(response.data, Some(42));
        assert!(response.errors.is_none());
    }

    #[test]
    fn validation_envelope_names_field() {
        let response = ApiResponse::<()>::validation_error(vec![ErrorDetail {
            field: Some("confirm_password".to_string()),
            code: "INVALID".to_string(),
            message: "Passwords do not match".to_string(),
        }]);
        assert!(!response.success);
        assert_eq!(response.code, 400);
        assert_eq!(response.message, "Passwords do not match");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["errors"][0]["field"], "confirm_password");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn forbidden_envelope_uses_code() {
        let response = ApiResponse::<()>::forbidden("Only the team owner can do that");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], 403);
        assert_eq!(json["errors"][0]["code"], "FORBIDDEN");
    }
}

use crate::db::models::auth::{ChangePasswordRequest, RegisterRequest, UpdateProfileRequest};
use crate::error::AppError;

/// Cross-field checks that `validator` attributes cannot express.
pub fn validate_registration(req: &RegisterRequest) -> Result<(), AppError> {
    if req.password != req.confirm_password {
        return Err(AppError::field("confirm_password", "Passwords do not match"));
    }

    if req.is_student
        && req
            .student_number
            .as_deref()
            .is_none_or(|number| number.trim().is_empty())
    {
        return Err(AppError::field(
            "student_number",
            "Student number is required for students",
        ));
    }

    Ok(())
}

pub fn validate_password_change(req: &ChangePasswordRequest) -> Result<(), AppError> {
    if req.new_password != req.confirm_password {
        return Err(AppError::field("confirm_password", "Passwords do not match"));
    }

    if req.new_password == req.old_password {
        return Err(AppError::field(
            "new_password",
            "New password must differ from the current one",
        ));
    }

    Ok(())
}

pub fn validate_update_profile(req: &UpdateProfileRequest) -> Result<(), AppError> {
    if req.username.is_none()
        && req.email.is_none()
        && req.first_name.is_none()
        && req.last_name.is_none()
    {
        return Err(AppError::validation("No update data provided"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegisterRequest {
        RegisterRequest {
            username: "sara".to_string(),
            email: "sara@example.com".to_string(),
            first_name: "Sara".to_string(),
            last_name: "Karimi".to_string(),
            password: "Secret123".to_string(),
            confirm_password: "Secret123".to_string(),
            is_student: false,
            student_number: None,
        }
    }

    #[test]
    fn mismatched_confirmation_names_field() {
        let mut req = registration();
        req.confirm_password = "Secret124".to_string();
        let err = validate_registration(&req).unwrap_err();
        assert_eq!(err.field_name(), Some("confirm_password"));
    }

    #[test]
    fn student_requires_number() {
        let mut req = registration();
        req.is_student = true;
        assert_eq!(
            validate_registration(&req).unwrap_err().field_name(),
            Some("student_number")
        );

        req.student_number = Some("   ".to_string());
        assert!(validate_registration(&req).is_err());

        req.student_number = Some("9812345".to_string());
        assert!(validate_registration(&req).is_ok());
    }

    #[test]
    fn empty_profile_update_is_rejected() {
        assert!(validate_update_profile(&UpdateProfileRequest::default()).is_err());
    }
}

// Unit tests focus on pure validation and token handling

use uuid::Uuid;
use validator::Validate;
use vazifeban::{
    config::AuthConfig,
    db::models::auth::{AuthUser, ChangePasswordRequest, RegisterRequest, UpdateProfileRequest},
    middleware::AuthService,
    validation::auth::{validate_password_change, validate_registration, validate_update_profile},
};

fn auth_service() -> AuthService {
    AuthService::new(AuthConfig {
        jwt_secret: "unit-test-secret".to_string(),
        access_token_expires_in: 3600,
        refresh_token_expires_in: 7200,
        bcrypt_cost: 4,
    })
}

fn register_request() -> RegisterRequest {
    RegisterRequest {
        username: "reza.k".to_string(),
        email: "reza@example.com".to_string(),
        first_name: "Reza".to_string(),
        last_name: "Karimi".to_string(),
        password: "Sprint2024!".to_string(),
        confirm_password: "Sprint2024!".to_string(),
        is_student: false,
        student_number: None,
    }
}

#[test]
fn register_request_passes_field_and_cross_field_rules() {
    let req = register_request();
    assert!(req.validate().is_ok());
    assert!(validate_registration(&req).is_ok());
}

#[test]
fn register_rejects_weak_password_and_bad_username() {
    let mut req = register_request();
    req.password = "password".to_string();
    req.confirm_password = "password".to_string();
    let errors = req.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("password"));

    let mut req = register_request();
    req.username = "9lives".to_string();
    let errors = req.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("username"));
}

#[test]
fn register_rejects_mismatched_confirmation() {
    let mut req = register_request();
    req.confirm_password = "Sprint2025!".to_string();
    let err = validate_registration(&req).unwrap_err();
    assert_eq!(err.field_name(), Some("confirm_password"));
}

#[test]
fn students_need_a_student_number() {
    let mut req = register_request();
    req.is_student = true;
    req.student_number = Some("   ".to_string());
    let err = validate_registration(&req).unwrap_err();
    assert_eq!(err.field_name(), Some("student_number"));

    req.student_number = Some("98123456".to_string());
    assert!(validate_registration(&req).is_ok());
}

#[test]
fn password_change_rules() {
    let ok = ChangePasswordRequest {
        old_password: "Sprint2024!".to_string(),
        new_password: "Backlog2025!".to_string(),
        confirm_password: "Backlog2025!".to_string(),
    };
    assert!(validate_password_change(&ok).is_ok());

    let same = ChangePasswordRequest {
        old_password: "Sprint2024!".to_string(),
        new_password: "Sprint2024!".to_string(),
        confirm_password: "Sprint2024!".to_string(),
    };
    assert_eq!(
        validate_password_change(&same).unwrap_err().field_name(),
        Some("new_password")
    );
}

#[test]
fn empty_profile_update_is_rejected() {
    assert!(validate_update_profile(&UpdateProfileRequest::default()).is_err());

    let req = UpdateProfileRequest {
        first_name: Some("Reza".to_string()),
        ..Default::default()
    };
    assert!(validate_update_profile(&req).is_ok());
}

#[test]
fn access_token_round_trip_keeps_identity() {
    let service = auth_service();
    let user = AuthUser {
        id: Uuid::new_v4(),
        username: "reza.k".to_string(),
        email: "reza@example.com".to_string(),
        is_staff: false,
        is_superuser: false,
    };

    let token = service.generate_access_token(&user).unwrap();
    let claims = service.verify_token(&token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, user.email);
}

#[test]
fn refresh_and_access_tokens_are_not_interchangeable() {
    let service = auth_service();
    let user_id = Uuid::new_v4();

    let refresh = service.generate_refresh_token(user_id).unwrap();
    assert_eq!(service.verify_refresh_token(&refresh).unwrap().sub, user_id);

    let user = AuthUser {
        id: user_id,
        username: "reza.k".to_string(),
        email: "reza@example.com".to_string(),
        is_staff: false,
        is_superuser: false,
    };
    let access = service.generate_access_token(&user).unwrap();
    assert!(service.verify_refresh_token(&access).is_err());
}

#[test]
fn token_signed_with_other_secret_is_rejected() {
    let other = AuthService::new(AuthConfig {
        jwt_secret: "another-secret".to_string(),
        access_token_expires_in: 3600,
        refresh_token_expires_in: 7200,
        bcrypt_cost: 4,
    });
    let token = other.generate_refresh_token(Uuid::new_v4()).unwrap();
    assert!(auth_service().verify_refresh_token(&token).is_err());
}

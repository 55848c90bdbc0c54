use bcrypt::{hash, verify};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::auth::{
        AuthUser, ChangePasswordRequest, LoginRequest, LoginResponse, NewUser, RegisterRequest,
        UpdateProfileRequest, User, UserChanges, UserInfo,
    },
    db::repositories::UserRepo,
    db::soft_delete::{Visibility, require_active},
    error::AppError,
    middleware::auth::AuthService,
    services::context::RequestContext,
    validation::auth::{validate_password_change, validate_registration, validate_update_profile},
};

/// Postgres names for the inline `UNIQUE` constraints on `users`.
const USER_UNIQUE_KEYS: &[(&str, &str, &str)] = &[
    ("users_username_key", "username", "Username already exists"),
    ("users_email_key", "email", "Email already exists"),
];

pub struct UsersService;

impl UsersService {
    pub fn register(
        conn: &mut PgConnection,
        auth: &AuthService,
        req: &RegisterRequest,
    ) -> Result<User, AppError> {
        validate_registration(req)?;

        if UserRepo::exists_by_username(conn, &req.username, None)? {
            return Err(AppError::field("username", "Username already exists"));
        }

        if UserRepo::exists_by_email(conn, &req.email, None)? {
            return Err(AppError::field("email", "Email already exists"));
        }

        let password_hash = hash(&req.password, auth.bcrypt_cost())?;

        let new_user = NewUser {
            username: req.username.clone(),
            email: req.email.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            password_hash,
            is_staff: false,
            is_superuser: false,
            is_student: req.is_student,
            student_number: req
                .student_number
                .as_ref()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        };

        let user = UserRepo::insert(conn, &new_user)
            .map_err(|e| AppError::unique_violation_by_constraint(e, USER_UNIQUE_KEYS))?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    pub fn login(
        conn: &mut PgConnection,
        auth: &AuthService,
        req: &LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let user = UserRepo::find_by_email(conn, &req.email)?
            .filter(|user| !user.is_deleted)
            .ok_or_else(|| AppError::auth("Invalid email or password"))?;

        if !verify(&req.password, &user.password_hash)? {
            return Err(AppError::auth("Invalid email or password"));
        }

        tracing::info!(user_id = %user.id, "User logged in");
        Self::issue_tokens(auth, user)
    }

    pub fn refresh(
        conn: &mut PgConnection,
        auth: &AuthService,
        refresh_token: &str,
    ) -> Result<LoginResponse, AppError> {
        let claims = auth
            .verify_refresh_token(refresh_token)
            .map_err(|_| AppError::auth("Invalid refresh token"))?;

        let user = UserRepo::find_by_id(conn, claims.sub)?
            .filter(|user| !user.is_deleted)
            .ok_or_else(|| AppError::auth("User not found or inactive"))?;

        Self::issue_tokens(auth, user)
    }

    fn issue_tokens(auth: &AuthService, user: User) -> Result<LoginResponse, AppError> {
        let access_token = auth.generate_access_token(&AuthUser::from(&user))?;
        let refresh_token = auth.generate_refresh_token(user.id)?;

        Ok(LoginResponse {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: auth.access_token_ttl(),
            user: UserInfo::from(user),
        })
    }

    pub fn get_profile(conn: &mut PgConnection, ctx: &RequestContext) -> Result<User, AppError> {
        require_active(UserRepo::find_by_id(conn, ctx.user_id)?, "User")
    }

    pub fn update_profile(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &UpdateProfileRequest,
    ) -> Result<User, AppError> {
        validate_update_profile(req)?;
        Self::get_profile(conn, ctx)?;

        if let Some(ref username) = req.username {
            if UserRepo::exists_by_username(conn, username, Some(ctx.user_id))? {
                return Err(AppError::field("username", "Username already exists"));
            }
        }

        if let Some(ref email) = req.email {
            if UserRepo::exists_by_email(conn, email, Some(ctx.user_id))? {
                return Err(AppError::field("email", "Email already exists"));
            }
        }

        let changes = UserChanges {
            username: req.username.clone(),
            email: req.email.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
        };

        let user = UserRepo::update(conn, ctx.user_id, &changes)
            .map_err(|e| AppError::unique_violation_by_constraint(e, USER_UNIQUE_KEYS))?;

        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    pub fn change_password(
        conn: &mut PgConnection,
        auth: &AuthService,
        ctx: &RequestContext,
        req: &ChangePasswordRequest,
    ) -> Result<(), AppError> {
        validate_password_change(req)?;

        let user = Self::get_profile(conn, ctx)?;
        if !verify(&req.old_password, &user.password_hash)? {
            return Err(AppError::field("old_password", "Current password is incorrect"));
        }

        let password_hash = hash(&req.new_password, auth.bcrypt_cost())?;
        UserRepo::update_password(conn, user.id, &password_hash)?;

        tracing::info!(user_id = %user.id, "Password changed");
        Ok(())
    }

    /// Soft-deletes the caller's own account.
    pub fn deactivate(conn: &mut PgConnection, ctx: &RequestContext) -> Result<(), AppError> {
        Self::get_profile(conn, ctx)?;
        UserRepo::soft_delete(conn, ctx.user_id)?;

        tracing::info!(user_id = %ctx.user_id, "Account deactivated");
        Ok(())
    }

    pub fn list(conn: &mut PgConnection, ctx: &RequestContext) -> Result<Vec<User>, AppError> {
        if !ctx.is_elevated() {
            return Err(AppError::forbidden("Only staff can list users"));
        }
        Ok(UserRepo::list(conn, Visibility::Active)?)
    }

    pub fn create_superuser(
        conn: &mut PgConnection,
        bcrypt_cost: u32,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        if UserRepo::exists_by_username(conn, username, None)? {
            return Err(AppError::field("username", "Username already exists"));
        }

        if UserRepo::exists_by_email(conn, email, None)? {
            return Err(AppError::field("email", "Email already exists"));
        }

        let new_user = NewUser {
            username: username.to_string(),
            email: email.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: hash(password, bcrypt_cost)?,
            is_staff: true,
            is_superuser: true,
            is_student: false,
            student_number: None,
        };

        let user = UserRepo::insert(conn, &new_user)
            .map_err(|e| AppError::unique_violation_by_constraint(e, USER_UNIQUE_KEYS))?;
        tracing::info!(user_id = %user.id, "Superuser created");
        Ok(user)
    }

    pub fn set_staff(
        conn: &mut PgConnection,
        email: &str,
        staff: bool,
    ) -> Result<User, AppError> {
        let user = require_active(UserRepo::find_by_email(conn, email)?, "User")?;
        let user = UserRepo::set_staff(conn, user.id, staff)?;

        tracing::info!(user_id = %user.id, is_staff = staff, "Staff flag changed");
        Ok(user)
    }

    pub fn find_active(conn: &mut PgConnection, user_id: Uuid) -> Result<User, AppError> {
        require_active(UserRepo::find_by_id(conn, user_id)?, "User")
    }
}

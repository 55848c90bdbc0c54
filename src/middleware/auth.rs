use std::time::{SystemTime, UNIX_EPOCH};

use axum::{extract::State, http::Request, middleware::Next, response::Response};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::config::AuthConfig;
use crate::db::models::{AuthUser, User};
use crate::db::repositories::UserRepo;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid, // user_id
    pub email: String,
    pub username: String,
    pub exp: u64,
    pub iat: u64,
    pub jti: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: uuid::Uuid,
    pub exp: u64,
    pub iat: u64,
    pub jti: String,
    /// Always "refresh", so an access token cannot be replayed as one.
    pub typ: String,
}

/// Issues and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

fn unix_now() -> AppResult<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| AppError::internal("System clock is before the Unix epoch"))
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn access_token_ttl(&self) -> u64 {
        self.config.access_token_expires_in
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.config.bcrypt_cost
    }

    pub fn generate_access_token(&self, user: &AuthUser) -> AppResult<String> {
        let now = unix_now()?;

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            exp: now + self.config.access_token_expires_in,
            iat: now,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )?)
    }

    pub fn generate_refresh_token(&self, user_id: uuid::Uuid) -> AppResult<String> {
        let now = unix_now()?;

        let claims = RefreshClaims {
            sub: user_id,
            exp: now + self.config.refresh_token_expires_in,
            iat: now,
            jti: uuid::Uuid::new_v4().to_string(),
            typ: "refresh".to_string(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )?)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    pub fn verify_refresh_token(&self, token: &str) -> AppResult<RefreshClaims> {
        let token_data = decode::<RefreshClaims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_ref()),
            &Validation::default(),
        )?;

        if token_data.claims.typ != "refresh" {
            return Err(AppError::auth("Invalid refresh token"));
        }

        Ok(token_data.claims)
    }
}

fn bearer_token<B>(request: &Request<B>) -> Option<String> {
    request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

/// Resolves the bearer token to an active user and stores it as [`AuthUser`]
/// in the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)
        .ok_or_else(|| AppError::auth("Authentication credentials were not provided"))?;

    let claims = state
        .auth_service
        .verify_token(&token)
        .map_err(|_| AppError::auth("Invalid or expired token"))?;

    let user = load_active_user(&state, claims.sub)?;
    request.extensions_mut().insert(AuthUser::from(&user));

    Ok(next.run(request).await)
}

fn load_active_user(state: &AppState, user_id: uuid::Uuid) -> AppResult<User> {
    let mut conn = state.db.get()?;

    match UserRepo::find_by_id(&mut conn, user_id)? {
        Some(user) if !user.is_deleted => Ok(user),
        _ => Err(AppError::auth("User not found or inactive")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(AuthConfig {
            jwt_secret: "test-secret".to_string(),
            access_token_expires_in: 3600,
            refresh_token_expires_in: 7200,
            bcrypt_cost: 4,
        })
    }

    fn user() -> AuthUser {
        AuthUser {
            id: uuid::Uuid::new_v4(),
            username: "sara".to_string(),
            email: "sara@example.com".to_string(),
            is_staff: false,
            is_superuser: false,
        }
    }

    #[test]
    fn access_token_round_trip() {
        let service = service();
        let user = user();
        let token = service.generate_access_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "sara");
    }

    #[test]
    fn access_token_is_not_a_refresh_token() {
        let service = service();
        let token = service.generate_access_token(&user()).unwrap();
        assert!(service.verify_refresh_token(&token).is_err());
    }

    #[test]
    fn refresh_token_verifies() {
        let service = service();
        let id = uuid::Uuid::new_v4();
        let token = service.generate_refresh_token(id).unwrap();
        assert_eq!(service.verify_refresh_token(&token).unwrap().sub, id);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = service().generate_access_token(&user()).unwrap();
        let other = AuthService::new(AuthConfig {
            jwt_secret: "another-secret".to_string(),
            access_token_expires_in: 3600,
            refresh_token_expires_in: 7200,
            bcrypt_cost: 4,
        });
        assert!(other.verify_token(&token).is_err());
    }
}

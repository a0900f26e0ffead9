use crate::domain::{Email, Password, Role};
use crate::repository::{NewUser, User, UserRepository};
use crate::services::ServiceError;
use crate::services::error::is_unique_violation;
use crate::services::jwt_service::{Claims, JwtService};
use anyhow::{Result, anyhow};
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::{PasswordHash, PasswordVerifier};
use rand::thread_rng;
use serde::Serialize;
use std::sync::Arc;

/// Public view of an account; never carries the password hash.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: Email,
    pub password: Password,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: Claims,
}

#[derive(Clone)]
pub struct AuthService<U: UserRepository> {
    pub user_repo: Arc<U>,
    pub jwt_service: Arc<JwtService>,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: Arc<U>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            user_repo,
            jwt_service,
        }
    }

    pub async fn create_user(&self, req: CreateUserRequest) -> Result<UserResponse> {
        if self
            .user_repo
            .find_by_email(req.email.as_ref())
            .await?
            .is_some()
        {
            return Err(ServiceError::conflict("email already registered").into());
        }

        let password_hash = hash_password(req.password.expose())?;

        let new_user = NewUser {
            email: req.email.to_string(),
            password_hash,
            role: req.role,
        };

        let user = self.user_repo.insert_user(new_user).await.map_err(|e| {
            if is_unique_violation(&e) {
                ServiceError::conflict("email already registered").into()
            } else {
                e
            }
        })?;

        tracing::info!(user_id = user.id, role = %user.role, "user created");

        Ok(user.into())
    }

    pub async fn login(&self, email: &Email, password: &Password) -> Result<AuthResponse> {
        let user = self
            .user_repo
            .find_by_email(email.as_ref())
            .await?
            .ok_or_else(|| ServiceError::InvalidCredentials("user not found".into()))?;

        if !verify_password(password.expose(), &user.password_hash)? {
            return Err(ServiceError::InvalidCredentials("incorrect password".into()).into());
        }

        let token = self
            .jwt_service
            .generate_token(user.id, &user.email, user.role)?;

        tracing::debug!(user_id = user.id, "login succeeded");

        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    pub fn verify(&self, token: &str) -> Result<VerifyResponse> {
        let claims = self
            .jwt_service
            .verify_token(token)
            .map_err(|_| ServiceError::Unauthorized("invalid token".into()))?;

        Ok(VerifyResponse {
            valid: true,
            user: claims,
        })
    }

    pub async fn get_user(&self, user_id: i64) -> Result<UserResponse> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user not found"))?;

        Ok(user.into())
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(thread_rng());
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!(e))?
        .to_string();
    Ok(password_hash)
}

pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(stored_hash).map_err(|_| anyhow!("invalid stored password hash"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

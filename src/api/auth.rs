use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::HeaderMap,
};
use std::sync::Arc;

use crate::handler::auth::{AuthenticatedUser, extract_bearer_token};
use crate::handler::errors::ErrorResponse;
use crate::handler::validation::{LoginPayload, validate_login};
use crate::repository::UserRepository;
use crate::services::auth_service::{AuthResponse, AuthService, UserResponse, VerifyResponse};

/// POST /api/auth/login
pub async fn login_api<U: UserRepository>(
    Extension(service): Extension<Arc<AuthService<U>>>,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> Result<Json<AuthResponse>, ErrorResponse> {
    let Json(payload) = payload?;
    let (email, password) = validate_login(&payload)?;

    let auth = service.login(&email, &password).await?;
    Ok(Json(auth))
}

/// GET /api/auth/verify
pub async fn verify_api<U: UserRepository>(
    Extension(service): Extension<Arc<AuthService<U>>>,
    headers: HeaderMap,
) -> Result<Json<VerifyResponse>, ErrorResponse> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ErrorResponse::unauthorized("token required"))?;

    Ok(Json(service.verify(&token)?))
}

/// GET /api/auth/me - stored account of the token holder
pub async fn me_api<U: UserRepository>(
    Extension(service): Extension<Arc<AuthService<U>>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserResponse>, ErrorResponse> {
    Ok(Json(service.get_user(user.user_id).await?))
}

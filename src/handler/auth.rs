use axum::{
    body::Body,
    extract::{Extension, Request},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::domain::Role;
use crate::handler::errors::ErrorResponse;
use crate::services::jwt_service::{Claims, JwtService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

impl TryFrom<Claims> for AuthenticatedUser {
    type Error = anyhow::Error;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: claims.sub.parse()?,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// Middleware that requires a valid bearer token.
pub async fn require_auth(
    Extension(jwt_service): Extension<Arc<JwtService>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(&headers) else {
        return ErrorResponse::unauthorized("token required").into_response();
    };

    match jwt_service
        .verify_token(&token)
        .and_then(AuthenticatedUser::try_from)
    {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "rejected bearer token");
            ErrorResponse::unauthorized("invalid token").into_response()
        }
    }
}

/// Middleware that lets the request through only for the listed roles.
/// Must run after [`require_auth`].
pub fn require_roles(
    allowed: Vec<Role>,
) -> impl Clone
+ Fn(
    Extension<AuthenticatedUser>,
    Request<Body>,
    Next,
) -> Pin<Box<dyn Future<Output = Response> + Send>> {
    let allowed: Arc<[Role]> = allowed.into();

    move |Extension(user): Extension<AuthenticatedUser>, request: Request<Body>, next: Next| {
        let allowed = allowed.clone();

        Box::pin(async move {
            if allowed.contains(&user.role) {
                next.run(request).await
            } else {
                tracing::warn!(user_id = user.user_id, role = %user.role, "role not permitted");
                ErrorResponse::forbidden("insufficient permissions").into_response()
            }
        })
    }
}

/// Extract the token from `Authorization: Bearer <token>`.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

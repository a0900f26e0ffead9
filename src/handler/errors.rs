use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use uuid::Uuid;

use crate::services::ServiceError;

/// JSON body returned for every failed request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            message: message.into(),
            status_code: status.as_u16(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<ServiceError> for ErrorResponse {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) | ServiceError::InvalidCredentials(msg) => {
                Self::bad_request(msg)
            }
            ServiceError::Unauthorized(msg) => Self::unauthorized(msg),
            ServiceError::NotFound(msg) => Self::not_found(msg),
            ServiceError::Conflict(msg) => Self::conflict(msg),
        }
    }
}

/// Converts a service failure into a response. Expected failures keep their
/// message; anything else is logged under a fresh error id and reported as a
/// generic 500 so database details never reach the client.
impl From<anyhow::Error> for ErrorResponse {
    fn from(err: anyhow::Error) -> Self {
        if let Some(service_err) = err.downcast_ref::<ServiceError>() {
            return service_err.clone().into();
        }

        let error_id = Uuid::new_v4();
        tracing::error!(
            error_id = %error_id,
            error = ?err,
            "Internal server error occurred"
        );
        Self::internal_server_error(format!("internal server error (id {error_id})"))
    }
}

impl From<JsonRejection> for ErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

/// Fallback for unknown routes.
pub async fn handle_404(uri: Uri) -> ErrorResponse {
    tracing::warn!("404 Not Found: {}", uri.path());
    ErrorResponse::not_found("route not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_error_response_creation() {
        let error = ErrorResponse::not_found("computer not found");
        assert_eq!(error.status_code, 404);
        assert_eq!(error.error, "Not Found");
        assert_eq!(error.message, "computer not found");
    }

    #[test]
    fn test_service_errors_map_to_status() {
        let cases = [
            (ServiceError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                ServiceError::InvalidCredentials("user not found".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::Unauthorized("invalid token".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (ServiceError::not_found("gone"), StatusCode::NOT_FOUND),
            (ServiceError::conflict("taken"), StatusCode::CONFLICT),
        ];

        for (err, status) in cases {
            let response = ErrorResponse::from(anyhow::Error::from(err));
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn test_unexpected_error_hides_details() {
        let response = ErrorResponse::from(anyhow!("connection refused on 10.0.0.3"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!response.message.contains("10.0.0.3"));
    }

    #[tokio::test]
    async fn test_fallback_is_json_404() {
        let response = handle_404(Uri::from_static("/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.message, "route not found");
    }
}

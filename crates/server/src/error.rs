//! Error-to-response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sentinel_application::AuthError;
use serde::Serialize;

/// Wrapper turning [`AuthError`] into an HTTP response.
///
/// Business-rule failures carry their message to the caller; infrastructure
/// failures are logged with detail and answered with a generic body.
#[derive(Debug)]
pub struct ApiError(pub AuthError);

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AuthError::InvalidCredentials
            | AuthError::Unauthenticated(_)
            | AuthError::InvalidSession
            | AuthError::ExpiredSession => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            AuthError::PermissionDenied => (StatusCode::FORBIDDEN, self.0.to_string()),
            AuthError::AccountCreationFailed => (StatusCode::CONFLICT, self.0.to_string()),
            AuthError::Upstream(detail) => {
                tracing::error!(error = %detail, "upstream failure");
                (StatusCode::BAD_GATEWAY, "upstream unavailable".to_string())
            }
            AuthError::Storage(detail) | AuthError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

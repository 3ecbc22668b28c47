//! Route table, handlers, and wire DTOs.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;
use sentinel_application::ports::{Clock, IdentityProvider, SessionStore, TokenCodec};
use sentinel_application::{AuthService, RequestMeta};
use sentinel_domain::Role;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password, forwarded to the identity provider.
    pub password: String,
}

/// Login response: both tokens.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Human-readable outcome.
    pub message: String,
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Account email.
    pub email: String,
    /// Display name.
    pub username: String,
    /// Password, forwarded to the identity provider.
    pub password: String,
}

/// Refresh request body.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// The refresh token issued at login.
    pub refresh_token: String,
}

/// Refresh response: a fresh access token, the refresh token unchanged.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Newly minted access token.
    pub access_token: String,
    /// The same refresh token the caller sent (no rotation).
    pub refresh_token: String,
    /// Human-readable outcome.
    pub message: String,
}

/// Generic message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

/// The caller's validated claims.
#[derive(Debug, Serialize)]
pub struct ClaimsResponse {
    /// Principal identifier.
    pub subject_id: String,
    /// Role ordinal as carried in the token.
    pub role: Role,
}

/// Builds the service router.
pub fn router<K, S, I, C>(service: Arc<AuthService<K, S, I, C>>) -> Router
where
    K: TokenCodec + 'static,
    S: SessionStore + 'static,
    I: IdentityProvider + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/v1/auth/login", post(login::<K, S, I, C>))
        .route("/v1/auth/register", post(register::<K, S, I, C>))
        .route("/v1/auth/refresh", post(refresh::<K, S, I, C>))
        .route("/v1/auth/claims", get(get_claims::<K, S, I, C>))
        .route(
            "/v1/auth/authorize/customer",
            get(authorize_customer::<K, S, I, C>),
        )
        .route(
            "/v1/auth/authorize/supplier",
            get(authorize_supplier::<K, S, I, C>),
        )
        .route("/v1/auth/authorize/admin", get(authorize_admin::<K, S, I, C>))
        .route("/v1/ping", get(ping))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Lowers the transport headers into explicit request metadata.
fn request_meta(headers: &HeaderMap) -> RequestMeta {
    RequestMeta {
        bearer: header_string(headers, "authorization"),
        user_agent: header_string(headers, "user-agent"),
        // First hop of the forwarded chain, when a proxy reports one.
        client_ip: header_string(headers, "x-forwarded-for")
            .and_then(|raw| raw.split(',').next().map(|ip| ip.trim().to_string())),
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

async fn login<K, S, I, C>(
    State(service): State<Arc<AuthService<K, S, I, C>>>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError>
where
    K: TokenCodec,
    S: SessionStore,
    I: IdentityProvider,
    C: Clock,
{
    let meta = request_meta(&headers);
    let out = service.login(&body.email, &body.password, &meta).await?;
    Ok(Json(LoginResponse {
        access_token: out.access_token,
        refresh_token: out.refresh_token,
        message: "login successful".to_string(),
    }))
}

async fn register<K, S, I, C>(
    State(service): State<Arc<AuthService<K, S, I, C>>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError>
where
    K: TokenCodec,
    S: SessionStore,
    I: IdentityProvider,
    C: Clock,
{
    let message = service
        .register(&body.email, &body.username, &body.password)
        .await?;
    Ok(Json(MessageResponse { message }))
}

async fn refresh<K, S, I, C>(
    State(service): State<Arc<AuthService<K, S, I, C>>>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError>
where
    K: TokenCodec,
    S: SessionStore,
    I: IdentityProvider,
    C: Clock,
{
    let out = service.refresh(&body.refresh_token).await?;
    Ok(Json(RefreshResponse {
        access_token: out.access_token,
        refresh_token: body.refresh_token,
        message: "access token issued".to_string(),
    }))
}

async fn get_claims<K, S, I, C>(
    State(service): State<Arc<AuthService<K, S, I, C>>>,
    headers: HeaderMap,
) -> Result<Json<ClaimsResponse>, ApiError>
where
    K: TokenCodec,
    S: SessionStore,
    I: IdentityProvider,
    C: Clock,
{
    let claims = service.get_claims(&request_meta(&headers))?;
    Ok(Json(ClaimsResponse {
        subject_id: claims.sub,
        role: claims.role,
    }))
}

async fn authorize_customer<K, S, I, C>(
    State(service): State<Arc<AuthService<K, S, I, C>>>,
    headers: HeaderMap,
) -> Result<Json<ClaimsResponse>, ApiError>
where
    K: TokenCodec,
    S: SessionStore,
    I: IdentityProvider,
    C: Clock,
{
    let claims = service.authorize_customer(&request_meta(&headers))?;
    Ok(Json(ClaimsResponse {
        subject_id: claims.sub,
        role: claims.role,
    }))
}

async fn authorize_supplier<K, S, I, C>(
    State(service): State<Arc<AuthService<K, S, I, C>>>,
    headers: HeaderMap,
) -> Result<Json<ClaimsResponse>, ApiError>
where
    K: TokenCodec,
    S: SessionStore,
    I: IdentityProvider,
    C: Clock,
{
    let claims = service.authorize_supplier(&request_meta(&headers))?;
    Ok(Json(ClaimsResponse {
        subject_id: claims.sub,
        role: claims.role,
    }))
}

async fn authorize_admin<K, S, I, C>(
    State(service): State<Arc<AuthService<K, S, I, C>>>,
    headers: HeaderMap,
) -> Result<Json<ClaimsResponse>, ApiError>
where
    K: TokenCodec,
    S: SessionStore,
    I: IdentityProvider,
    C: Clock,
{
    let claims = service.authorize_admin(&request_meta(&headers))?;
    Ok(Json(ClaimsResponse {
        subject_id: claims.sub,
        role: claims.role,
    }))
}

async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "pong".to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_request_meta_lowers_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "tok-123".parse().unwrap());
        headers.insert("user-agent", "curl/8.0".parse().unwrap());
        headers.insert("x-forwarded-for", "10.0.0.9, 172.16.0.1".parse().unwrap());

        let meta = request_meta(&headers);
        assert_eq!(meta.bearer.as_deref(), Some("tok-123"));
        assert_eq!(meta.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(meta.client_ip.as_deref(), Some("10.0.0.9"));
    }

    #[test]
    fn test_request_meta_tolerates_absent_headers() {
        let meta = request_meta(&HeaderMap::new());
        assert_eq!(meta, RequestMeta::default());
    }
}

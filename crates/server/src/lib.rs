//! Sentinel Server - HTTP surface for the auth service
//!
//! Exposes the auth orchestrator over axum: login, registration
//! pass-through, refresh, claims introspection, role-gated authorization
//! pre-checks, and a liveness probe.

pub mod config;
pub mod error;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use routes::router;

//! Sentinel Application - Token lifecycle and authorization orchestration
//!
//! This crate holds the auth state machine: issuing and verifying signed
//! tokens, reconciling refresh tokens against the session store, and
//! deriving authorization decisions from the role hierarchy. External
//! systems are reached only through the ports defined here.

pub mod auth;
pub mod error;
pub mod meta;
pub mod ports;

pub use auth::{AuthService, Gate, LoginOutput, RefreshOutput, TokenPolicy};
pub use error::{AuthError, AuthResult};
pub use meta::RequestMeta;

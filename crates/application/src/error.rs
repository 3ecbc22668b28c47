//! Application error taxonomy.

use thiserror::Error;

/// Request-level failures surfaced by the auth orchestrator.
///
/// Business-rule failures carry their taxonomy kind to the caller;
/// infrastructure failures propagate without local retry. None of these
/// are fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Bad email or password at login. Deliberately generic: the response
    /// never distinguishes "unknown email" from "wrong password".
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Registration rejected by the identity provider.
    #[error("email already in use or invalid")]
    AccountCreationFailed,

    /// Missing, malformed, forged, or expired credential.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Refresh token verified but its backing session is absent or does not
    /// belong to the token's principal.
    #[error("invalid session")]
    InvalidSession,

    /// The backing session is past its TTL.
    #[error("expired session")]
    ExpiredSession,

    /// Caller's role does not meet the required minimum.
    #[error("permission denied")]
    PermissionDenied,

    /// Session store failure.
    #[error("storage failure: {0}")]
    Storage(String),

    /// Identity provider transport failure.
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// Token signing or serialization failure.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

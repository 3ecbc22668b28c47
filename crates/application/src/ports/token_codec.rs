//! Token codec port.

use chrono::Duration;
use sentinel_domain::Claims;

/// Error type for token operations.
///
/// `Invalid` and `Expired` stay distinct here so the refresh and
/// authorization paths can be tested separately; the transport boundary
/// collapses both into an unauthenticated response.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The signing key is unusable or serialization failed.
    #[error("token signing failed: {0}")]
    Signing(String),

    /// Structure, algorithm header, or signature did not check out.
    #[error("invalid token: {0}")]
    Invalid(String),

    /// Signature valid but the embedded expiry is in the past.
    #[error("token expired")]
    Expired,
}

/// Port for encoding and decoding signed claim sets.
///
/// The codec is duration-agnostic: callers supply the short access lifetime
/// or the long refresh lifetime per issuance.
pub trait TokenCodec: Send + Sync {
    /// Signs `claims` with `exp` stamped to `now + lifetime`,
    /// overwriting whatever expiry the caller left in place.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if the secret is unusable or
    /// encoding fails.
    fn issue(&self, claims: &Claims, lifetime: Duration) -> Result<String, TokenError>;

    /// Parses and validates a signed token, returning its claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for a wrong algorithm header or bad
    /// signature and [`TokenError::Expired`] for a past expiry.
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

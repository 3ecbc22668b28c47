//! HS256 JWT implementation of the token codec port.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use sentinel_application::ports::{TokenCodec, TokenError};
use sentinel_domain::Claims;
use uuid::Uuid;

/// Token codec signing and verifying JWTs with a single shared HMAC secret.
///
/// The secret is loaded once at process start and the codec is immutable
/// afterwards; clones share nothing mutable, so one instance serves any
/// number of concurrent handlers.
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    /// Creates a codec over the given HMAC secret.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if the secret is empty.
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::Signing("empty signing secret".to_string()));
        }
        // Pin the algorithm: a token declaring anything but HS256 in its
        // header must not verify, whatever its signature says.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }
}

impl TokenCodec for JwtCodec {
    fn issue(&self, claims: &Claims, lifetime: Duration) -> Result<String, TokenError> {
        let mut claims = claims.clone();
        claims.exp = (Utc::now() + lifetime).timestamp();
        // Unique per issuance: `exp` has one-second granularity, so without
        // a token id two logins in the same second would sign byte-identical
        // refresh tokens and collide in the session store.
        claims.jti = Uuid::new_v4().to_string();
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| TokenError::Signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(err.to_string()),
            })
    }
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose key material.
        f.debug_struct("JwtCodec").finish_non_exhaustive()
    }
}

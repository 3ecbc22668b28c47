//! Stateless authorization engine.

use sentinel_domain::{Claims, Role};

use crate::error::{AuthError, AuthResult};
use crate::meta::RequestMeta;
use crate::ports::{TokenCodec, TokenError};

/// Derives an authorization decision from a bearer token alone.
///
/// No session lookup happens here: the check is O(1) and side-effect-free,
/// at the cost of not being able to revoke a single access token before its
/// short expiry elapses.
#[derive(Debug, Clone)]
pub struct Gate<K> {
    codec: K,
}

impl<K: TokenCodec> Gate<K> {
    /// Creates a gate over the given token codec.
    #[must_use]
    pub const fn new(codec: K) -> Self {
        Self { codec }
    }

    /// The codec this gate verifies tokens with.
    #[must_use]
    pub const fn codec(&self) -> &K {
        &self.codec
    }

    /// Reads the raw bearer token from the request metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthenticated`] when the `authorization` key
    /// is absent or empty.
    pub fn extract_bearer<'m>(&self, meta: &'m RequestMeta) -> AuthResult<&'m str> {
        match meta.bearer.as_deref() {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AuthError::Unauthenticated(
                "missing authorization metadata".to_string(),
            )),
        }
    }

    /// Extracts and verifies the bearer token, returning its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthenticated`] carrying the underlying
    /// reason: missing credential, malformed token, bad signature, or
    /// expiry.
    pub fn authenticate(&self, meta: &RequestMeta) -> AuthResult<Claims> {
        let token = self.extract_bearer(meta)?;
        self.codec.verify(token).map_err(unauthenticated)
    }

    /// Authenticates the caller and checks its role against `minimum`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::PermissionDenied`] when the role check fails,
    /// or propagates [`AuthError::Unauthenticated`] from authentication.
    pub fn authorize(&self, meta: &RequestMeta, minimum: Role) -> AuthResult<Claims> {
        let claims = self.authenticate(meta)?;
        if claims.role.satisfies(minimum) {
            Ok(claims)
        } else {
            tracing::debug!(
                role = %claims.role,
                required = %minimum,
                "authorization refused"
            );
            Err(AuthError::PermissionDenied)
        }
    }
}

fn unauthenticated(err: TokenError) -> AuthError {
    AuthError::Unauthenticated(err.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Codec stub: tokens are `"<sub>:<role ordinal>"`, plus two magic
    /// values for the failure paths.
    struct StubCodec;

    impl TokenCodec for StubCodec {
        fn issue(&self, claims: &Claims, _lifetime: Duration) -> Result<String, TokenError> {
            Ok(format!("{}:{}", claims.sub, u8::from(claims.role)))
        }

        fn verify(&self, token: &str) -> Result<Claims, TokenError> {
            if token == "expired" {
                return Err(TokenError::Expired);
            }
            let (sub, role) = token
                .split_once(':')
                .ok_or_else(|| TokenError::Invalid("malformed".to_string()))?;
            let ordinal: u8 = role
                .parse()
                .map_err(|_| TokenError::Invalid("malformed".to_string()))?;
            let role =
                Role::try_from(ordinal).map_err(|e| TokenError::Invalid(e.to_string()))?;
            Ok(Claims {
                sub: sub.to_string(),
                role,
                exp: 0,
                jti: String::new(),
            })
        }
    }

    fn meta_for(role: Role) -> RequestMeta {
        RequestMeta::with_bearer(format!("7:{}", u8::from(role)))
    }

    #[test]
    fn test_missing_bearer_is_unauthenticated() {
        let gate = Gate::new(StubCodec);
        let err = gate.authenticate(&RequestMeta::default()).unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated(_)));
    }

    #[test]
    fn test_empty_bearer_is_unauthenticated() {
        let gate = Gate::new(StubCodec);
        let err = gate.authenticate(&RequestMeta::with_bearer("")).unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated(_)));
    }

    #[test]
    fn test_expired_token_is_unauthenticated() {
        let gate = Gate::new(StubCodec);
        let err = gate
            .authorize(&RequestMeta::with_bearer("expired"), Role::Customer)
            .unwrap_err();
        assert_eq!(err, AuthError::Unauthenticated("token expired".to_string()));
    }

    #[test]
    fn test_malformed_token_is_unauthenticated() {
        let gate = Gate::new(StubCodec);
        let err = gate
            .authenticate(&RequestMeta::with_bearer("garbage"))
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated(_)));
    }

    #[test]
    fn test_authenticate_returns_claims() {
        let gate = Gate::new(StubCodec);
        let claims = gate.authenticate(&meta_for(Role::Supplier)).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.role, Role::Supplier);
    }

    #[test]
    fn test_minimum_role_matrix() {
        let gate = Gate::new(StubCodec);

        assert!(gate.authorize(&meta_for(Role::Customer), Role::Customer).is_ok());
        assert!(gate.authorize(&meta_for(Role::Supplier), Role::Customer).is_ok());
        assert!(gate.authorize(&meta_for(Role::Supplier), Role::Supplier).is_ok());

        let err = gate
            .authorize(&meta_for(Role::Customer), Role::Supplier)
            .unwrap_err();
        assert_eq!(err, AuthError::PermissionDenied);
    }

    #[test]
    fn test_admin_requires_and_grants_exact_match() {
        let gate = Gate::new(StubCodec);

        assert!(gate.authorize(&meta_for(Role::Admin), Role::Admin).is_ok());
        assert_eq!(
            gate.authorize(&meta_for(Role::Supplier), Role::Admin)
                .unwrap_err(),
            AuthError::PermissionDenied
        );
        // Admin does not inherit the lower tiers.
        assert_eq!(
            gate.authorize(&meta_for(Role::Admin), Role::Supplier)
                .unwrap_err(),
            AuthError::PermissionDenied
        );
    }
}

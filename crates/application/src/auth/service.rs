//! Auth orchestrator.
//!
//! Each entry point is one transition of the per-request state machine:
//! login, registration pass-through, refresh, and the role-gated
//! authorization checks other services call before serving a request.

use chrono::Duration;
use sentinel_domain::{Claims, Role, Session};

use crate::error::{AuthError, AuthResult};
use crate::meta::RequestMeta;
use crate::ports::{
    Clock, IdentityError, IdentityProvider, SessionStore, SessionStoreError, TokenCodec,
};

use super::gate::Gate;

/// Token and session lifetimes, fixed at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    /// Lifetime of access tokens (short; single-digit hours).
    pub access_ttl: Duration,
    /// Lifetime of refresh tokens (long; tens of days).
    pub refresh_ttl: Duration,
    /// Lifetime of the persisted session backing a refresh token.
    pub session_ttl: Duration,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            access_ttl: Duration::hours(6),
            refresh_ttl: Duration::days(30),
            session_ttl: Duration::days(30),
        }
    }
}

/// Output of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutput {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token, backed by a persisted session.
    pub refresh_token: String,
}

/// Output of a successful refresh. The refresh token itself is reused
/// unchanged; no rotation happens here (known limitation).
#[derive(Debug, Clone)]
pub struct RefreshOutput {
    /// Freshly minted access token.
    pub access_token: String,
}

/// Façade composing the token codec, session store, and identity provider
/// into the auth entry points exposed by the RPC layer.
pub struct AuthService<K, S, I, C> {
    gate: Gate<K>,
    store: S,
    identity: I,
    clock: C,
    policy: TokenPolicy,
}

impl<K, S, I, C> AuthService<K, S, I, C>
where
    K: TokenCodec,
    S: SessionStore,
    I: IdentityProvider,
    C: Clock,
{
    /// Wires an orchestrator from its collaborators.
    pub const fn new(codec: K, store: S, identity: I, clock: C, policy: TokenPolicy) -> Self {
        Self {
            gate: Gate::new(codec),
            store,
            identity,
            clock,
            policy,
        }
    }

    /// The stateless authorization engine, for callers that only need
    /// token checks.
    #[must_use]
    pub const fn gate(&self) -> &Gate<K> {
        &self.gate
    }

    /// Verifies credentials against the identity provider, issues an
    /// access/refresh token pair, and persists the backing session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for any provider failure
    /// (unknown email, wrong password, or transport error; the distinction
    /// is never surfaced), [`AuthError::Storage`] when the session cannot
    /// be persisted. A login whose session write fails returns no tokens.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        meta: &RequestMeta,
    ) -> AuthResult<LoginOutput> {
        let principal = self
            .identity
            .lookup_by_email(email, password)
            .await
            .map_err(|err| {
                tracing::debug!(error = %err, "credential check failed");
                AuthError::InvalidCredentials
            })?;

        let claims = Claims::new(principal.id.to_string(), principal.role);
        let access_token = self.issue(&claims, self.policy.access_ttl)?;
        let mut refresh_token = self.issue(&claims, self.policy.refresh_ttl)?;

        let user_agent = meta.user_agent.clone().unwrap_or_default();
        let session = Session::new(
            principal.id,
            refresh_token.clone(),
            user_agent.clone(),
            meta.client_ip.clone(),
            self.clock.now(),
            self.policy.session_ttl,
        );
        match self.store.create(session).await {
            Ok(()) => {}
            Err(SessionStoreError::Conflict) => {
                // Colliding refresh token: retry once with a fresh issuance.
                // A second collision is a store problem, not bad luck.
                refresh_token = self.issue(&claims, self.policy.refresh_ttl)?;
                let retry = Session::new(
                    principal.id,
                    refresh_token.clone(),
                    user_agent,
                    meta.client_ip.clone(),
                    self.clock.now(),
                    self.policy.session_ttl,
                );
                self.store.create(retry).await.map_err(storage_failure)?;
            }
            Err(err) => return Err(storage_failure(err)),
        }

        tracing::info!(user_id = principal.id, "login succeeded");
        Ok(LoginOutput {
            access_token,
            refresh_token,
        })
    }

    /// Mints a new access token for a valid refresh token.
    ///
    /// The refresh token is verified cryptographically before storage is
    /// touched; the session row is then the authoritative revocation
    /// point, checked independently of the token's own expiry. The
    /// principal's role is re-fetched so a role change since login shows
    /// up in the new access token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthenticated`] for a bad token,
    /// [`AuthError::InvalidSession`] when the session is absent, belongs
    /// to another principal, or the principal is gone, and
    /// [`AuthError::ExpiredSession`] when the session TTL has elapsed.
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<RefreshOutput> {
        let claims = self
            .gate
            .codec()
            .verify(refresh_token)
            .map_err(|err| AuthError::Unauthenticated(err.to_string()))?;

        let session = match self.store.get_by_refresh_token(refresh_token).await {
            Ok(session) => session,
            Err(SessionStoreError::NotFound) => return Err(AuthError::InvalidSession),
            Err(err) => return Err(storage_failure(err)),
        };

        // A token that verifies but maps to someone else's session is
        // indistinguishable from no session at all.
        if session.user_id.to_string() != claims.sub {
            return Err(AuthError::InvalidSession);
        }
        if session.is_expired(self.clock.now()) {
            return Err(AuthError::ExpiredSession);
        }

        let principal = self
            .identity
            .lookup_by_id(session.user_id)
            .await
            .map_err(|err| {
                tracing::debug!(error = %err, user_id = session.user_id, "principal re-fetch failed");
                AuthError::InvalidSession
            })?;

        let fresh = Claims::new(principal.id.to_string(), principal.role);
        let access_token = self.issue(&fresh, self.policy.access_ttl)?;
        Ok(RefreshOutput { access_token })
    }

    /// Passes an account creation request through to the identity
    /// provider.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AccountCreationFailed`] when the provider
    /// rejects the request and [`AuthError::Upstream`] when it cannot be
    /// reached.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> AuthResult<String> {
        match self.identity.create_account(email, username, password).await {
            Ok(message) => Ok(message),
            Err(IdentityError::Unavailable(msg)) => Err(AuthError::Upstream(msg)),
            Err(err) => {
                tracing::debug!(error = %err, "registration rejected");
                Err(AuthError::AccountCreationFailed)
            }
        }
    }

    /// Returns the caller's validated claims.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthenticated`] when the bearer token is
    /// missing or fails verification.
    pub fn get_claims(&self, meta: &RequestMeta) -> AuthResult<Claims> {
        self.gate.authenticate(meta)
    }

    /// Authorization pre-check for customer-tier endpoints.
    ///
    /// # Errors
    ///
    /// See [`Gate::authorize`].
    pub fn authorize_customer(&self, meta: &RequestMeta) -> AuthResult<Claims> {
        self.gate.authorize(meta, Role::Customer)
    }

    /// Authorization pre-check for supplier-tier endpoints.
    ///
    /// # Errors
    ///
    /// See [`Gate::authorize`].
    pub fn authorize_supplier(&self, meta: &RequestMeta) -> AuthResult<Claims> {
        self.gate.authorize(meta, Role::Supplier)
    }

    /// Authorization pre-check for admin-only endpoints (exact match).
    ///
    /// # Errors
    ///
    /// See [`Gate::authorize`].
    pub fn authorize_admin(&self, meta: &RequestMeta) -> AuthResult<Claims> {
        self.gate.authorize(meta, Role::Admin)
    }

    fn issue(&self, claims: &Claims, lifetime: Duration) -> AuthResult<String> {
        self.gate
            .codec()
            .issue(claims, lifetime)
            .map_err(|err| AuthError::Internal(err.to_string()))
    }
}

fn storage_failure(err: SessionStoreError) -> AuthError {
    AuthError::Storage(err.to_string())
}

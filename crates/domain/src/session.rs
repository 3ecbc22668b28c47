//! Persisted refresh-session record.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Server-side record backing one refresh-token grant.
///
/// Created exactly once per successful login and never mutated afterwards.
/// The session row, not the refresh token's own embedded expiry, is the
/// authoritative revocation point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Unique identifier, generated at creation.
    pub id: Uuid,
    /// Owning user, from the identity provider's response.
    pub user_id: i64,
    /// The refresh token value; unique lookup key.
    pub refresh_token: String,
    /// User agent captured from the login request.
    pub user_agent: String,
    /// Client IP when the transport exposed one. Optional metadata only.
    pub client_ip: Option<String>,
    /// Fixed at creation; never extended.
    pub expires_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new session expiring `ttl` after `now`.
    #[must_use]
    pub fn new(
        user_id: i64,
        refresh_token: impl Into<String>,
        user_agent: impl Into<String>,
        client_ip: Option<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            refresh_token: refresh_token.into(),
            user_agent: user_agent.into(),
            client_ip,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    /// Whether the session has passed its TTL at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expiry_is_created_at_plus_ttl() {
        let now = Utc::now();
        let session = Session::new(7, "tok", "agent", None, now, Duration::days(30));
        assert_eq!(session.created_at, now);
        assert_eq!(session.expires_at, now + Duration::days(30));
        assert_eq!(session.user_id, 7);
    }

    #[test]
    fn test_is_expired_boundary() {
        let now = Utc::now();
        let session = Session::new(1, "tok", "agent", None, now, Duration::days(1));
        assert!(!session.is_expired(now));
        assert!(!session.is_expired(session.expires_at));
        assert!(session.is_expired(session.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_ids_are_unique() {
        let now = Utc::now();
        let a = Session::new(1, "a", "ua", None, now, Duration::days(1));
        let b = Session::new(1, "b", "ua", None, now, Duration::days(1));
        assert!(a.id != b.id);
    }
}

//! In-memory session persistence.

use std::collections::HashMap;
use std::sync::Arc;

use sentinel_application::ports::{SessionStore, SessionStoreError};
use sentinel_domain::Session;
use tokio::sync::RwLock;

/// Thread-safe in-memory session store keyed by refresh token.
///
/// Uniqueness of `refresh_token` is enforced under the write lock, which is
/// the storage-layer guarantee the application relies on. Suitable for
/// tests and single-node deployments; the port is the seam for a database
/// with a unique index on the token column.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: Session) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.refresh_token) {
            return Err(SessionStoreError::Conflict);
        }
        sessions.insert(session.refresh_token.clone(), session);
        Ok(())
    }

    async fn get_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Session, SessionStoreError> {
        self.sessions
            .read()
            .await
            .get(refresh_token)
            .cloned()
            .ok_or(SessionStoreError::NotFound)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn session(token: &str) -> Session {
        Session::new(7, token, "ua", None, Utc::now(), Duration::days(30))
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = InMemorySessionStore::new();
        store.create(session("tok-1")).await.unwrap();

        let found = store.get_by_refresh_token("tok-1").await.unwrap();
        assert_eq!(found.user_id, 7);
        assert_eq!(found.refresh_token, "tok-1");
    }

    #[tokio::test]
    async fn test_lookup_miss_is_not_found() {
        let store = InMemorySessionStore::new();
        assert_eq!(
            store.get_by_refresh_token("absent").await.unwrap_err(),
            SessionStoreError::NotFound
        );
    }

    #[tokio::test]
    async fn test_duplicate_refresh_token_conflicts() {
        let store = InMemorySessionStore::new();
        store.create(session("tok-1")).await.unwrap();
        assert_eq!(
            store.create(session("tok-1")).await.unwrap_err(),
            SessionStoreError::Conflict
        );
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_for_distinct_tokens() {
        let store = InMemorySessionStore::new();
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create(session(&format!("tok-{i}"))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(store.count().await, 16);
    }

    #[tokio::test]
    async fn test_store_applies_no_expiry_policy() {
        // Expiry is the orchestrator's business; the store hands back
        // expired rows untouched.
        let store = InMemorySessionStore::new();
        let stale = Session::new(
            7,
            "old",
            "ua",
            None,
            Utc::now() - Duration::days(90),
            Duration::days(30),
        );
        store.create(stale.clone()).await.unwrap();
        assert_eq!(store.get_by_refresh_token("old").await.unwrap(), stale);
    }
}

//! Session store port.

use sentinel_domain::Session;

/// Error type for session persistence operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum SessionStoreError {
    /// A session with the same refresh token already exists.
    #[error("refresh token already registered")]
    Conflict,

    /// No session matches the given refresh token.
    #[error("session not found")]
    NotFound,

    /// Any other persistence failure.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Port for persisting refresh-session records.
///
/// The store owns persistence only: uniqueness of `refresh_token` is
/// enforced here (a unique index in a database, a keyed map in memory),
/// while expiry policy belongs to the orchestrator. No update or delete
/// operations exist on the request path; expired rows are an external
/// housekeeping concern.
pub trait SessionStore: Send + Sync {
    /// Inserts a new session row.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Conflict`] on a duplicate refresh token
    /// and [`SessionStoreError::Storage`] on any other failure.
    fn create(
        &self,
        session: Session,
    ) -> impl std::future::Future<Output = Result<(), SessionStoreError>> + Send;

    /// Exact-match lookup by refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::NotFound`] when no row matches.
    fn get_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> impl std::future::Future<Output = Result<Session, SessionStoreError>> + Send;
}

//! Identity provider port.
//!
//! User records and credential verification live in an external service;
//! this port covers only the request/response shapes the auth core needs.

use sentinel_domain::Role;

/// The subset of a user record the auth core cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// User identifier.
    pub id: i64,
    /// Current role tier.
    pub role: Role,
}

/// Error type for identity provider calls.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The provider answered and said no (unknown user, bad password,
    /// duplicate email). The distinction is not carried further.
    #[error("rejected by identity provider: {0}")]
    Rejected(String),

    /// The provider could not be reached or failed mid-call.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Port for the external user-management collaborator.
pub trait IdentityProvider: Send + Sync {
    /// Verifies credentials and returns the matching principal.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Rejected`] for unknown email or wrong
    /// password, [`IdentityError::Unavailable`] for transport failures.
    fn lookup_by_email(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<Principal, IdentityError>> + Send;

    /// Fetches a principal's current record by id.
    ///
    /// # Errors
    ///
    /// Returns an error when the user is gone or the provider is down.
    fn lookup_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Principal, IdentityError>> + Send;

    /// Creates a new account, returning the provider's message.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Rejected`] for conflicts or invalid input,
    /// [`IdentityError::Unavailable`] for transport failures.
    fn create_account(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<String, IdentityError>> + Send;
}

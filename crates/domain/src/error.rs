//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or conversion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A role ordinal does not map to a known role.
    #[error("unknown role ordinal: {0}")]
    UnknownRole(u8),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

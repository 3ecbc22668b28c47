//! Sentinel Domain - Core auth types
//!
//! This crate defines the domain model for the Sentinel auth service.
//! All types here are pure Rust with no I/O dependencies.

pub mod claims;
pub mod error;
pub mod role;
pub mod session;

pub use claims::Claims;
pub use error::{DomainError, DomainResult};
pub use role::Role;
pub use session::Session;

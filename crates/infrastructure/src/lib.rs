//! Sentinel Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer: the HS256 token codec, session persistence, the
//! HTTP client for the identity provider, and the system clock.

pub mod adapters;
pub mod identity;
pub mod store;
pub mod token;

pub use adapters::SystemClock;
pub use identity::HttpIdentityProvider;
pub use store::InMemorySessionStore;
pub use token::JwtCodec;

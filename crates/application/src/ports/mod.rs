//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the auth core and external systems.
//! Each port is a trait that can be implemented by adapters in the
//! infrastructure layer.

mod clock;
mod identity_provider;
mod session_store;
mod token_codec;

pub use clock::Clock;
pub use identity_provider::{IdentityError, IdentityProvider, Principal};
pub use session_store::{SessionStore, SessionStoreError};
pub use token_codec::{TokenCodec, TokenError};

//! Auth orchestration for the Sentinel service.
//!
//! This module provides:
//! - `Gate`, the stateless authorization engine (bearer extraction, token
//!   verification, minimum-role checks)
//! - `AuthService`, the orchestrator behind the RPC surface (login,
//!   registration pass-through, refresh, role-gated authorization)

mod gate;
mod service;

pub use gate::Gate;
pub use service::{AuthService, LoginOutput, RefreshOutput, TokenPolicy};

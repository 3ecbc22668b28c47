//! Signed token payload.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// The claim set embedded in access and refresh tokens.
///
/// Field names follow the registered JWT claim names where one exists, so
/// tokens minted here verify against off-the-shelf JWT tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Principal identifier (the user id, stringified).
    pub sub: String,
    /// Role tier granted to the principal.
    pub role: Role,
    /// Expiry as seconds since the Unix epoch. Always stamped by the token
    /// codec at signing time; a caller-supplied value is overwritten.
    #[serde(default)]
    pub exp: i64,
    /// Token identifier, unique per issuance. Stamped by the token codec;
    /// without it two tokens signed over the same subject, role, and
    /// second-granularity expiry would be byte-identical.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jti: String,
}

impl Claims {
    /// Creates a fresh claim set with no expiry or token id; the codec
    /// fills `exp` and `jti`.
    #[must_use]
    pub fn new(subject_id: impl Into<String>, role: Role) -> Self {
        Self {
            sub: subject_id.into(),
            role,
            exp: 0,
            jti: String::new(),
        }
    }
}

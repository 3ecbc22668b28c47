//! Request metadata handed to the orchestrator by the transport.

/// Metadata captured from an inbound request.
///
/// The transport lowers header names before building this, so lookups here
/// are exact. Claims derived from the bearer token are returned to the
/// caller explicitly rather than stashed in a request context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    /// Raw bearer token from the `authorization` metadata key, if present.
    pub bearer: Option<String>,
    /// Caller's user agent, if present.
    pub user_agent: Option<String>,
    /// Caller's IP as reported by the transport. Optional metadata only;
    /// never validated.
    pub client_ip: Option<String>,
}

impl RequestMeta {
    /// Metadata carrying only a bearer token; convenient for callers that
    /// hit the authorization entry points.
    #[must_use]
    pub fn with_bearer(token: impl Into<String>) -> Self {
        Self {
            bearer: Some(token.into()),
            ..Self::default()
        }
    }
}

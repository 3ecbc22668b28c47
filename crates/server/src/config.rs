//! Environment-sourced server configuration.

use std::net::SocketAddr;

use chrono::Duration;
use sentinel_application::TokenPolicy;
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is absent.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is present but unusable.
    #[error("invalid value for {var}: {message}")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

/// Process configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// HMAC signing secret for the token codec. Never logged.
    pub hmac_secret: String,
    /// Base URL of the user-management service.
    pub user_service_url: String,
    /// Access token lifetime.
    pub access_token_ttl: Duration,
    /// Refresh token lifetime.
    pub refresh_token_ttl: Duration,
    /// Session TTL.
    pub session_ttl: Duration,
}

impl ServerConfig {
    /// Loads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `SENTINEL_HMAC_SECRET` is absent or
    /// empty, or any numeric variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::from_env`].
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let host = lookup("SENTINEL_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = parse_or(&lookup, "SENTINEL_PORT", 8080)?;
        let addr = format!("{host}:{port}")
            .parse()
            .map_err(|err: std::net::AddrParseError| ConfigError::Invalid {
                var: "SENTINEL_HOST",
                message: err.to_string(),
            })?;

        let hmac_secret = lookup("SENTINEL_HMAC_SECRET")
            .ok_or(ConfigError::Missing("SENTINEL_HMAC_SECRET"))?;
        if hmac_secret.is_empty() {
            return Err(ConfigError::Invalid {
                var: "SENTINEL_HMAC_SECRET",
                message: "must not be empty".to_string(),
            });
        }

        let user_service_url = lookup("SENTINEL_USER_SERVICE_URL")
            .unwrap_or_else(|| "http://user-service:8080".to_string());

        let access_hours = positive(&lookup, "SENTINEL_ACCESS_TOKEN_HOURS", 6)?;
        let refresh_days = positive(&lookup, "SENTINEL_REFRESH_TOKEN_DAYS", 30)?;
        let session_days = positive(&lookup, "SENTINEL_SESSION_TTL_DAYS", 30)?;

        Ok(Self {
            addr,
            hmac_secret,
            user_service_url,
            access_token_ttl: bounded(Duration::try_hours(access_hours), "SENTINEL_ACCESS_TOKEN_HOURS")?,
            refresh_token_ttl: bounded(Duration::try_days(refresh_days), "SENTINEL_REFRESH_TOKEN_DAYS")?,
            session_ttl: bounded(Duration::try_days(session_days), "SENTINEL_SESSION_TTL_DAYS")?,
        })
    }

    /// The token and session lifetimes as a policy for the orchestrator.
    #[must_use]
    pub const fn token_policy(&self) -> TokenPolicy {
        TokenPolicy {
            access_ttl: self.access_token_ttl,
            refresh_ttl: self.refresh_token_ttl,
            session_ttl: self.session_ttl,
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    lookup(var).map_or(Ok(default), |raw| {
        raw.parse().map_err(|err: T::Err| ConfigError::Invalid {
            var,
            message: err.to_string(),
        })
    })
}

fn bounded(
    duration: Option<Duration>,
    var: &'static str,
) -> Result<Duration, ConfigError> {
    duration.ok_or(ConfigError::Invalid {
        var,
        message: "out of range".to_string(),
    })
}

fn positive(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: i64,
) -> Result<i64, ConfigError> {
    let value: i64 = parse_or(lookup, var, default)?;
    if value > 0 {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            var,
            message: "must be positive".to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_with_only_the_secret_set() {
        let config =
            ServerConfig::from_lookup(lookup_from(&[("SENTINEL_HMAC_SECRET", "s3cret")]))
                .unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.access_token_ttl, Duration::hours(6));
        assert_eq!(config.refresh_token_ttl, Duration::days(30));
        assert_eq!(config.session_ttl, Duration::days(30));
        assert_eq!(config.user_service_url, "http://user-service:8080");
    }

    #[test]
    fn test_missing_secret_fails() {
        assert!(matches!(
            ServerConfig::from_lookup(lookup_from(&[])).unwrap_err(),
            ConfigError::Missing("SENTINEL_HMAC_SECRET")
        ));
    }

    #[test]
    fn test_empty_secret_fails() {
        assert!(matches!(
            ServerConfig::from_lookup(lookup_from(&[("SENTINEL_HMAC_SECRET", "")]))
                .unwrap_err(),
            ConfigError::Invalid { var: "SENTINEL_HMAC_SECRET", .. }
        ));
    }

    #[test]
    fn test_overrides_are_honored() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("SENTINEL_HMAC_SECRET", "s3cret"),
            ("SENTINEL_PORT", "9000"),
            ("SENTINEL_ACCESS_TOKEN_HOURS", "2"),
            ("SENTINEL_REFRESH_TOKEN_DAYS", "7"),
        ]))
        .unwrap();
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.access_token_ttl, Duration::hours(2));
        assert_eq!(config.refresh_token_ttl, Duration::days(7));
    }

    #[test]
    fn test_out_of_range_duration_is_an_error_not_a_panic() {
        let err = ServerConfig::from_lookup(lookup_from(&[
            ("SENTINEL_HMAC_SECRET", "s3cret"),
            ("SENTINEL_REFRESH_TOKEN_DAYS", "9223372036854775807"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { var: "SENTINEL_REFRESH_TOKEN_DAYS", .. }
        ));
    }

    #[test]
    fn test_non_positive_duration_fails() {
        let err = ServerConfig::from_lookup(lookup_from(&[
            ("SENTINEL_HMAC_SECRET", "s3cret"),
            ("SENTINEL_SESSION_TTL_DAYS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "SENTINEL_SESSION_TTL_DAYS", .. }));
    }
}

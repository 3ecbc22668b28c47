//! Identity provider implementation using reqwest.
//!
//! This adapter implements the `IdentityProvider` port against the
//! user-management service's JSON API. Only the request/response shapes
//! matter to the auth core; the provider owns user records and password
//! verification.

use reqwest::{Client, Response};
use sentinel_application::ports::{IdentityError, IdentityProvider, Principal};
use sentinel_domain::Role;
use serde::{Deserialize, Serialize};

/// HTTP client for the external user-management service.
pub struct HttpIdentityProvider {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct NewAccountBody<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct PrincipalBody {
    id: i64,
    role: u8,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

impl HttpIdentityProvider {
    /// Creates a provider client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unavailable`] if the HTTP client cannot be
    /// built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .user_agent(concat!("sentinel/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|err| IdentityError::Unavailable(err.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a provider over a caller-supplied reqwest client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn accepted(response: Response) -> Result<Response, IdentityError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status.is_server_error() {
            Err(IdentityError::Unavailable(format!("status {status}")))
        } else {
            Err(IdentityError::Rejected(format!("status {status}")))
        }
    }

    async fn principal_from(response: Response) -> Result<Principal, IdentityError> {
        let response = Self::accepted(response)?;
        let body: PrincipalBody = response
            .json()
            .await
            .map_err(|err| IdentityError::Unavailable(err.to_string()))?;
        principal_from_body(&body)
    }
}

fn principal_from_body(body: &PrincipalBody) -> Result<Principal, IdentityError> {
    let role = Role::try_from(body.role)
        .map_err(|err| IdentityError::Rejected(err.to_string()))?;
    Ok(Principal { id: body.id, role })
}

impl IdentityProvider for HttpIdentityProvider {
    async fn lookup_by_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Principal, IdentityError> {
        let response = self
            .client
            .post(self.endpoint("/users/lookup"))
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(|err| IdentityError::Unavailable(err.to_string()))?;
        Self::principal_from(response).await
    }

    async fn lookup_by_id(&self, id: i64) -> Result<Principal, IdentityError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/users/{id}")))
            .send()
            .await
            .map_err(|err| IdentityError::Unavailable(err.to_string()))?;
        Self::principal_from(response).await
    }

    async fn create_account(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<String, IdentityError> {
        let response = self
            .client
            .post(self.endpoint("/users"))
            .json(&NewAccountBody {
                email,
                username,
                password,
            })
            .send()
            .await
            .map_err(|err| IdentityError::Unavailable(err.to_string()))?;
        let response = Self::accepted(response)?;
        let body: MessageBody = response
            .json()
            .await
            .map_err(|err| IdentityError::Unavailable(err.to_string()))?;
        Ok(body.message)
    }
}

impl std::fmt::Debug for HttpIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpIdentityProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let provider =
            HttpIdentityProvider::with_client(Client::new(), "http://user-service:8080/");
        assert_eq!(provider.endpoint("/users/7"), "http://user-service:8080/users/7");
    }

    #[test]
    fn test_principal_body_maps_role_ordinal() {
        let body: PrincipalBody = serde_json::from_str(r#"{"id":7,"role":1}"#).unwrap();
        let principal = principal_from_body(&body).unwrap();
        assert_eq!(principal.id, 7);
        assert_eq!(principal.role, Role::Customer);
    }

    #[test]
    fn test_unknown_role_ordinal_is_rejected() {
        let body = PrincipalBody { id: 7, role: 9 };
        assert!(matches!(
            principal_from_body(&body).unwrap_err(),
            IdentityError::Rejected(_)
        ));
    }
}

//! Identity provider client
//!
//! Verifies ID tokens issued by the external identity provider by asking the
//! provider to resolve them (`accounts:lookup`). A token that the provider
//! cannot resolve is rejected; nothing is verified locally.

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::env::{env_parse, env_string};

const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Claims of a verified ID token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Provider-side user id, stable across logins
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Invalid or expired ID token")]
    InvalidToken,
    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
    #[error("Identity provider not configured: {0}")]
    NotConfigured(&'static str),
}

/// Token verification seam
#[trait_variant::make(IdentityVerifier: Send)]
pub trait LocalIdentityVerifier {
    /// Resolve an ID token into the identity it was issued for
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, IdentityError>;
}

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Web API key of the provider project
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl IdentityConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// `IDENTITY_API_KEY` (required), `IDENTITY_BASE_URL`, `IDENTITY_TIMEOUT_MS`
    pub fn from_env() -> Result<Self, IdentityError> {
        let api_key =
            env_string("IDENTITY_API_KEY").ok_or(IdentityError::NotConfigured("IDENTITY_API_KEY"))?;
        Ok(Self {
            base_url: env_string("IDENTITY_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_millis(
                env_parse("IDENTITY_TIMEOUT_MS").unwrap_or(DEFAULT_TIMEOUT_MS),
            ),
            ..Self::new(api_key)
        })
    }
}

/// Verifier backed by the Identity Toolkit REST API
#[derive(Clone)]
pub struct FirebaseIdentityVerifier {
    config: Arc<IdentityConfig>,
    client: reqwest::Client,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
    photo_url: Option<String>,
}

impl FirebaseIdentityVerifier {
    pub fn new(config: IdentityConfig) -> Result<Self, IdentityError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    fn lookup_url(&self) -> String {
        format!(
            "{}/v1/accounts:lookup",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

impl IdentityVerifier for FirebaseIdentityVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, IdentityError> {
        let response = self
            .client
            .post(self.lookup_url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&serde_json::json!({ "idToken": id_token }))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Identity provider request failed");
                IdentityError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if matches!(status.as_u16(), 400 | 401 | 403) {
            return Err(IdentityError::InvalidToken);
        }
        if !status.is_success() {
            return Err(IdentityError::Unavailable(format!(
                "identity provider answered {status}"
            )));
        }

        let body: LookupResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        let user = body
            .users
            .into_iter()
            .next()
            .ok_or(IdentityError::InvalidToken)?;

        Ok(VerifiedIdentity {
            uid: user.local_id,
            email: user.email,
            display_name: user.display_name,
            photo_url: user.photo_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn verifier(server: &MockServer) -> FirebaseIdentityVerifier {
        FirebaseIdentityVerifier::new(IdentityConfig {
            base_url: server.uri(),
            ..IdentityConfig::new("test-key")
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_resolves_known_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:lookup"))
            .and(query_param("key", "test-key"))
            .and(body_json(serde_json::json!({ "idToken": "good-token" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "users": [{
                    "localId": "uid-1",
                    "email": "parent@example.com",
                    "displayName": "Parent",
                    "photoUrl": "https://img.example.com/p.png"
                }]
            })))
            .mount(&server)
            .await;

        let identity = IdentityVerifier::verify(&verifier(&server), "good-token").await.unwrap();
        assert_eq!(identity.uid, "uid-1");
        assert_eq!(identity.email.as_deref(), Some("parent@example.com"));
        assert_eq!(identity.display_name.as_deref(), Some("Parent"));
    }

    #[tokio::test]
    async fn test_rejected_token_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:lookup"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "code": 400, "message": "INVALID_ID_TOKEN" }
            })))
            .mount(&server)
            .await;

        let err = IdentityVerifier::verify(&verifier(&server), "bad-token").await.unwrap_err();
        assert!(matches!(err, IdentityError::InvalidToken));
    }

    #[tokio::test]
    async fn test_empty_user_list_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let err = IdentityVerifier::verify(&verifier(&server), "orphan").await.unwrap_err();
        assert!(matches!(err, IdentityError::InvalidToken));
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = IdentityVerifier::verify(&verifier(&server), "any").await.unwrap_err();
        assert!(matches!(err, IdentityError::Unavailable(_)));
    }
}

//! Identity provider client over its public key and backend REST API.

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use hireai_core::config::IdentityProviderConfig;
use hireai_core::error::{AppError, ErrorKind};
use hireai_entity::identity::ExternalIdentity;

use super::provider::{IdentityProvider, VerifiedSession};

#[derive(Debug, Deserialize)]
struct ProviderClaims {
    sub: String,
    #[serde(default)]
    sid: Option<String>,
    #[serde(default)]
    azp: Option<String>,
}

/// Verifies RS256 session tokens locally and fetches identities over HTTP.
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    api_base_url: String,
    secret_key: String,
    decoding_key: DecodingKey,
    validation: Validation,
    authorized_parties: Vec<String>,
}

impl std::fmt::Debug for HttpIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpIdentityProvider")
            .field("api_base_url", &self.api_base_url)
            .field("authorized_parties", &self.authorized_parties)
            .finish()
    }
}

impl HttpIdentityProvider {
    pub fn new(config: &IdentityProviderConfig) -> Result<Self, AppError> {
        let decoding_key =
            DecodingKey::from_rsa_pem(config.jwt_public_key.as_bytes()).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "identity_provider.jwt_public_key is not a valid RSA PEM key",
                    e,
                )
            })?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = 5;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build identity provider HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
            decoding_key,
            validation,
            authorized_parties: config.authorized_parties.clone(),
        })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn verify_session_token(&self, token: &str) -> Result<VerifiedSession, AppError> {
        let claims = decode::<ProviderClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Provider session token rejected");
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Session token has expired")
                    }
                    _ => AppError::unauthorized("Invalid session token"),
                }
            })?;

        if !self.authorized_parties.is_empty() {
            let allowed = claims
                .azp
                .as_deref()
                .is_some_and(|azp| self.authorized_parties.iter().any(|p| p == azp));
            if !allowed {
                warn!(azp = ?claims.azp, "Session token from unauthorized party");
                return Err(AppError::unauthorized("Session token from unauthorized party"));
            }
        }

        Ok(VerifiedSession {
            external_id: claims.sub,
            session_id: claims.sid,
        })
    }

    async fn fetch_identity(&self, external_id: &str) -> Result<ExternalIdentity, AppError> {
        let url = format!("{}/users/{}", self.api_base_url, external_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Identity provider request failed",
                    e,
                )
            })?;

        match response.status() {
            status if status.is_success() => response.json::<ExternalIdentity>().await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Identity provider returned an unreadable user",
                    e,
                )
            }),
            StatusCode::NOT_FOUND => Err(AppError::unauthorized(format!(
                "Identity '{external_id}' does not exist"
            ))),
            status => Err(AppError::external_service(format!(
                "Identity provider returned {status} for user lookup"
            ))),
        }
    }
}

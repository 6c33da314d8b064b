//! Backend session API and its HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use hireai_core::error::{AppError, ErrorKind};
use hireai_entity::user::UserView;

use crate::config::ClientConfig;

/// The backend's answer to a login exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendLogin {
    pub user: UserView,
    /// The backend reused the session from a login moments earlier.
    pub cached: bool,
}

/// Backend session endpoints the coordinator depends on.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Exchange an external bearer token for the first-party session.
    async fn login(&self, bearer: &str) -> Result<BackendLogin, AppError>;

    /// Revoke the first-party session.
    async fn logout(&self) -> Result<(), AppError>;
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    user: UserView,
    #[serde(default)]
    cached: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// [`BackendApi`] over HTTP. The cookie store keeps the session cookie
/// between calls the way a browser would.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl BackendApi for BackendClient {
    async fn login(&self, bearer: &str) -> Result<BackendLogin, AppError> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response).await?;
        let body: LoginBody = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Backend login returned an unreadable body",
                e,
            )
        })?;

        debug!(user_id = %body.user.id, cached = ?body.cached, "Backend login exchanged");
        Ok(BackendLogin {
            user: body.user,
            cached: body.cached.unwrap_or(false),
        })
    }

    async fn logout(&self) -> Result<(), AppError> {
        let response = self
            .client
            .post(self.url("/auth/logout"))
            .send()
            .await
            .map_err(transport_error)?;
        check_status(response).await.map(|_| ())
    }
}

fn transport_error(e: reqwest::Error) -> AppError {
    AppError::with_source(ErrorKind::ExternalService, "Backend request failed", e)
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .map(|b| b.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Backend returned {status}"));

    Err(match status {
        StatusCode::UNAUTHORIZED => AppError::unauthorized(message),
        StatusCode::FORBIDDEN => AppError::forbidden(message),
        _ => AppError::external_service(message),
    })
}

//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use hireai_api::{AppState, build_app};
use hireai_auth::StaticIdentityProvider;
use hireai_auth::webhook::compute_signature;
use hireai_core::config::AppConfig;
use hireai_database::{MemoryProfileStore, MemoryUserStore};
use hireai_entity::identity::ExternalIdentity;

/// Webhook secret in the provider's `whsec_<base64>` form.
pub const WEBHOOK_SECRET: &str = "whsec_aGlyZWFpLWludGVncmF0aW9uLXNlY3JldA==";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    pub users: MemoryUserStore,
    pub profiles: MemoryProfileStore,
    pub identity_provider: StaticIdentityProvider,
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over in-memory stores.
    pub fn new() -> Self {
        Self::with_config(Self::test_config())
    }

    pub fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.session_secret = "integration-test-session-secret".to_string();
        config.webhook.secret = Some(WEBHOOK_SECRET.to_string());
        config
    }

    pub fn with_config(config: AppConfig) -> Self {
        let users = MemoryUserStore::new();
        let profiles = MemoryProfileStore::new();
        let identity_provider = StaticIdentityProvider::new();

        let state = AppState::new(
            config.clone(),
            Arc::new(users.clone()),
            Arc::new(profiles.clone()),
            Arc::new(identity_provider.clone()),
        )
        .expect("Failed to build app state");

        Self {
            router: build_app(state),
            users,
            profiles,
            identity_provider,
            config,
        }
    }

    /// Register `identity` with the provider and accept `token` for it.
    pub async fn sign_in(&self, token: &str, identity: Value) -> ExternalIdentity {
        let identity: ExternalIdentity =
            serde_json::from_value(identity).expect("Invalid identity fixture");
        self.identity_provider
            .sign_in(token, identity.clone())
            .await;
        identity
    }

    /// Exchange `bearer` for a session cookie and return the cookie pair
    /// (`token=...`).
    pub async fn login(&self, bearer: &str) -> String {
        let response = self
            .request("POST", "/api/auth/login", None, Some(bearer), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .cookie_pair(&self.config.auth.cookie_name)
            .expect("No session cookie in login response")
    }

    /// Deliver a correctly signed webhook with the current timestamp.
    pub async fn webhook(&self, payload: &Value) -> TestResponse {
        let body = serde_json::to_vec(payload).expect("Failed to serialize payload");
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature =
            compute_signature(WEBHOOK_SECRET, &timestamp, &body).expect("Failed to sign");
        self.webhook_raw(body, Some(format!("t={timestamp},v1={signature}")), None)
            .await
    }

    /// Deliver a webhook with explicit signature headers.
    pub async fn webhook_raw(
        &self,
        body: Vec<u8>,
        signature: Option<String>,
        timestamp: Option<String>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method("POST")
            .uri("/api/webhook")
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(signature) = signature {
            req = req.header("svix-signature", signature);
        }
        if let Some(timestamp) = timestamp {
            req = req.header("svix-timestamp", timestamp);
        }

        self.send(req.body(Body::from(body)).expect("Failed to build request"))
            .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(bearer) = bearer {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", bearer));
        }
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        self.send(req.body(Body::from(body_str)).expect("Failed to build request"))
            .await
    }

    /// Make a bodiless request with a verbatim `Authorization` header
    pub async fn request_with_authorization(
        &self,
        method: &str,
        path: &str,
        authorization: &str,
    ) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::AUTHORIZATION, authorization)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Full `Set-Cookie` header for cookie `name`, if one was set.
    pub fn set_cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
            .map(str::to_string)
    }

    /// `name=value` part of the `Set-Cookie` header for `name`.
    pub fn cookie_pair(&self, name: &str) -> Option<String> {
        self.set_cookie(name)
            .and_then(|c| c.split(';').next().map(|p| p.trim().to_string()))
    }

    /// Cookie attributes (everything after the first `;`), lowercased and
    /// without `Max-Age`/`Expires`, for comparing mint and removal cookies.
    pub fn cookie_attributes(&self, name: &str) -> Option<Vec<String>> {
        self.set_cookie(name).map(|c| {
            let mut attrs: Vec<String> = c
                .split(';')
                .skip(1)
                .map(|a| a.trim().to_ascii_lowercase())
                .filter(|a| !a.starts_with("max-age") && !a.starts_with("expires"))
                .collect();
            attrs.sort();
            attrs
        })
    }
}

/// Identity fixture in the provider's user shape.
pub fn identity(id: &str, email: &str, public_role: Option<&str>, unsafe_role: Option<&str>) -> Value {
    let mut public_metadata = serde_json::Map::new();
    if let Some(role) = public_role {
        public_metadata.insert("role".to_string(), Value::from(role));
    }
    let mut unsafe_metadata = serde_json::Map::new();
    if let Some(role) = unsafe_role {
        unsafe_metadata.insert("role".to_string(), Value::from(role));
    }

    serde_json::json!({
        "id": id,
        "email_addresses": [{
            "id": format!("idn_{id}"),
            "email_address": email,
            "verification": { "status": "verified" }
        }],
        "primary_email_address_id": format!("idn_{id}"),
        "public_metadata": public_metadata,
        "unsafe_metadata": unsafe_metadata,
    })
}

/// Webhook envelope around `data`.
pub fn event(event_type: &str, data: Value) -> Value {
    serde_json::json!({ "type": event_type, "data": data })
}

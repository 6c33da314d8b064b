//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the backend client and the auth coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API, including the `/api` prefix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// How long initialization stays disabled after a logout completes.
    #[serde(default = "default_settle_delay")]
    pub logout_settle_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_seconds: default_request_timeout(),
            logout_settle_ms: default_settle_delay(),
        }
    }
}

impl ClientConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.logout_settle_ms)
    }
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_settle_delay() -> u64 {
    2000
}

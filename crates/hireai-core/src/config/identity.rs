//! External identity provider configuration.

use serde::{Deserialize, Serialize};

/// Settings for talking to the external identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityProviderConfig {
    /// Base URL of the provider's backend API.
    #[serde(default = "default_api_base")]
    pub api_base_url: String,
    /// Secret API key used for backend calls.
    #[serde(default)]
    pub secret_key: String,
    /// PEM-encoded RSA public key that signs the provider's session tokens.
    #[serde(default)]
    pub jwt_public_key: String,
    /// Accepted `azp` (authorized party) values. Empty accepts any.
    #[serde(default)]
    pub authorized_parties: Vec<String>,
    /// HTTP timeout for backend calls in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for IdentityProviderConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base(),
            secret_key: String::new(),
            jwt_public_key: String::new(),
            authorized_parties: Vec::new(),
            request_timeout_seconds: default_timeout(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.clerk.com/v1".to_string()
}

fn default_timeout() -> u64 {
    10
}

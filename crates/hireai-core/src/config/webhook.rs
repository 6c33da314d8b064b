//! Identity webhook configuration.

use serde::{Deserialize, Serialize};

/// Inbound webhook verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Shared signing secret. Secrets prefixed `whsec_` are base64 encoded.
    /// Every delivery is rejected while this is unset.
    #[serde(default)]
    pub secret: Option<String>,
    /// Maximum allowed clock difference between the signature timestamp and now.
    #[serde(default = "default_tolerance")]
    pub tolerance_seconds: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            secret: None,
            tolerance_seconds: default_tolerance(),
        }
    }
}

fn default_tolerance() -> u64 {
    300
}

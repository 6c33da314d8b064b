//! First-party session configuration.

use serde::{Deserialize, Serialize};

/// `SameSite` attribute applied to the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    /// Only sent on same-site requests.
    Strict,
    /// Sent on same-site requests and top-level navigations.
    #[default]
    Lax,
    /// Always sent; requires `secure`.
    None,
}

/// Session token and cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session JWT signing (HMAC-SHA256).
    #[serde(default = "default_session_secret")]
    pub session_secret: String,
    /// Session token lifetime in days.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_days: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Cookie `Path` attribute.
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,
    /// Whether the cookie carries the `Secure` attribute.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Cookie `SameSite` attribute.
    #[serde(default)]
    pub same_site: SameSitePolicy,
    /// Window in which repeated logins for one user reuse the existing cookie.
    #[serde(default = "default_login_cooldown")]
    pub login_cooldown_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: default_session_secret(),
            session_ttl_days: default_session_ttl(),
            cookie_name: default_cookie_name(),
            cookie_path: default_cookie_path(),
            cookie_secure: false,
            same_site: SameSitePolicy::default(),
            login_cooldown_seconds: default_login_cooldown(),
        }
    }
}

fn default_session_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_session_ttl() -> u64 {
    7
}

fn default_cookie_name() -> String {
    "token".to_string()
}

fn default_cookie_path() -> String {
    "/".to_string()
}

fn default_login_cooldown() -> u64 {
    5
}

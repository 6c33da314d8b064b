//! Session cookie attributes.

use cookie::{Cookie, CookieBuilder, SameSite};

use hireai_core::config::{AuthConfig, SameSitePolicy};

/// The attribute set used for the session cookie.
///
/// Minting and clearing share [`base`](Self::base), so a removal cookie
/// always carries the same `HttpOnly`, `Secure`, `SameSite` and `Path` as
/// the cookie it replaces.
#[derive(Debug, Clone)]
pub struct SessionCookiePolicy {
    name: String,
    path: String,
    secure: bool,
    same_site: SameSite,
    max_age: cookie::time::Duration,
}

impl SessionCookiePolicy {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            path: config.cookie_path.clone(),
            secure: config.cookie_secure,
            same_site: match config.same_site {
                SameSitePolicy::Strict => SameSite::Strict,
                SameSitePolicy::Lax => SameSite::Lax,
                SameSitePolicy::None => SameSite::None,
            },
            max_age: cookie::time::Duration::days(config.session_ttl_days as i64),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn base(&self, value: String) -> CookieBuilder<'static> {
        Cookie::build((self.name.clone(), value))
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .path(self.path.clone())
    }

    /// Cookie carrying a freshly minted token.
    pub fn issue(&self, token: String) -> Cookie<'static> {
        self.base(token).max_age(self.max_age).build()
    }

    /// Cookie instructing the client to drop the session cookie.
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = self.base(String::new()).build();
        cookie.make_removal();
        cookie
    }
}

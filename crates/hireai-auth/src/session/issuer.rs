//! Session issuance for authenticated local users.

use std::time::Duration;

use cookie::Cookie;
use tracing::{debug, info};

use hireai_core::config::AuthConfig;
use hireai_core::error::AppError;
use hireai_entity::user::LocalUser;

use super::claims::SessionClaims;
use super::cookie::SessionCookiePolicy;
use super::dedup::LoginDeduplicator;
use super::token::SessionTokenCodec;

/// Result of a login.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// A new token was minted; set this cookie on the response.
    Minted(Cookie<'static>),
    /// A login for the same user landed within the cooldown window; the
    /// client keeps the cookie it already has.
    Cached,
}

impl LoginOutcome {
    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Cached)
    }
}

/// Mints and clears the first-party session cookie.
#[derive(Debug)]
pub struct SessionIssuer {
    codec: SessionTokenCodec,
    cookies: SessionCookiePolicy,
    dedup: LoginDeduplicator,
}

impl SessionIssuer {
    pub fn new(
        codec: SessionTokenCodec,
        cookies: SessionCookiePolicy,
        login_cooldown: Duration,
    ) -> Self {
        Self {
            codec,
            cookies,
            dedup: LoginDeduplicator::new(login_cooldown),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            SessionTokenCodec::from_config(config),
            SessionCookiePolicy::from_config(config),
            Duration::from_secs(config.login_cooldown_seconds),
        )
    }

    /// Name of the session cookie.
    pub fn cookie_name(&self) -> &str {
        self.cookies.name()
    }

    /// Issue a session for `user`, or report a cached login.
    pub fn login(&self, user: &LocalUser) -> Result<LoginOutcome, AppError> {
        if !self.dedup.should_mint(user.id) {
            debug!(user_id = %user.id, "Login within cooldown; reusing existing session");
            return Ok(LoginOutcome::Cached);
        }

        let token = match self.codec.mint(user.id) {
            Ok(token) => token,
            Err(e) => {
                self.dedup.forget(user.id);
                return Err(e);
            }
        };

        info!(user_id = %user.id, role = %user.role, "Session issued");
        Ok(LoginOutcome::Minted(self.cookies.issue(token)))
    }

    /// Validate a session token taken from the cookie.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        self.codec.verify(token)
    }

    /// Removal cookie with the same attributes used at mint time.
    pub fn logout_cookie(&self) -> Cookie<'static> {
        self.cookies.removal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hireai_entity::user::UserRole;
    use uuid::Uuid;

    fn user() -> LocalUser {
        LocalUser {
            id: Uuid::new_v4(),
            external_id: "ext_1".to_string(),
            username: "jane".to_string(),
            email: None,
            role: UserRole::Candidate,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_login_mints_then_caches() {
        let issuer = SessionIssuer::from_config(&AuthConfig::default());
        let user = user();

        let first = issuer.login(&user).unwrap();
        let second = issuer.login(&user).unwrap();

        let LoginOutcome::Minted(cookie) = first else {
            panic!("first login should mint");
        };
        assert!(second.is_cached());

        let claims = issuer.verify(cookie.value()).unwrap();
        assert_eq!(claims.user_id(), user.id);
    }

    #[test]
    fn test_zero_cooldown_always_mints() {
        let config = AuthConfig {
            login_cooldown_seconds: 0,
            ..AuthConfig::default()
        };
        let issuer = SessionIssuer::from_config(&config);
        let user = user();
        assert!(!issuer.login(&user).unwrap().is_cached());
        assert!(!issuer.login(&user).unwrap().is_cached());
    }

    #[test]
    fn test_logout_cookie_matches_mint_attributes() {
        let issuer = SessionIssuer::from_config(&AuthConfig::default());
        let LoginOutcome::Minted(minted) = issuer.login(&user()).unwrap() else {
            panic!("expected mint");
        };
        let cleared = issuer.logout_cookie();

        assert_eq!(cleared.name(), issuer.cookie_name());
        assert_eq!(
            (cleared.http_only(), cleared.secure(), cleared.same_site(), cleared.path()),
            (minted.http_only(), minted.secure(), minted.same_site(), minted.path())
        );
    }
}

//! Ordered-source precedence for identity-derived values.
//!
//! Role and company information can come from several places: the
//! provider-controlled (high-trust) metadata tier, the holder-writable
//! (low-trust) tier, and whatever the backend last returned. The rules here
//! are pure so the server reconciler and the client coordinator resolve the
//! same inputs to the same answer.

use crate::user::UserRole;

/// Return the first `Some` value in priority order.
pub fn first_present<T, I>(sources: I) -> Option<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    sources.into_iter().flatten().next()
}

/// The three places a role may be declared, highest priority first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleSources {
    pub high_trust: Option<UserRole>,
    pub low_trust: Option<UserRole>,
    pub backend: Option<UserRole>,
}

impl RoleSources {
    /// The declared role, if any source carries one.
    pub fn declared(&self) -> Option<UserRole> {
        first_present([self.high_trust, self.low_trust, self.backend])
    }

    /// The effective role, falling back to [`UserRole::Candidate`].
    pub fn resolve(&self) -> UserRole {
        self.declared().unwrap_or_default()
    }
}

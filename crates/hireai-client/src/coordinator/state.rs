//! Observable coordinator state.

use hireai_entity::user::{UserRole, UserView};

/// Whether a settled coordinator has a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Authenticated,
    Anonymous,
}

/// Lifecycle phase.
///
/// `Uninitialized` → `Initializing` → `Ready` → `LoggingOut` → `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPhase {
    #[default]
    Uninitialized,
    Initializing,
    Ready(Readiness),
    LoggingOut,
}

/// A point-in-time view for the user interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub phase: AuthPhase,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub role: Option<UserRole>,
    pub backend_user: Option<UserView>,
    pub auth_error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CoordinatorState {
    pub phase: AuthPhase,
    pub role: Option<UserRole>,
    pub backend_user: Option<UserView>,
    pub auth_error: Option<String>,
}

impl CoordinatorState {
    /// Drop everything tied to the previous sign-in.
    pub fn clear(&mut self, phase: AuthPhase) {
        *self = Self {
            phase,
            ..Self::default()
        };
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            phase: self.phase,
            is_authenticated: self.phase == AuthPhase::Ready(Readiness::Authenticated),
            is_loading: matches!(
                self.phase,
                AuthPhase::Uninitialized | AuthPhase::Initializing | AuthPhase::LoggingOut
            ),
            role: self.role,
            backend_user: self.backend_user.clone(),
            auth_error: self.auth_error.clone(),
        }
    }
}

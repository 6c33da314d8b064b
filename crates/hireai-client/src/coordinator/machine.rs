//! The coordinator proper.
//!
//! Initialization is single-flight per sign-in and every async result is
//! tagged with the generation it started in; a logout bumps the generation so
//! an exchange still in flight cannot resurrect cleared state.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use hireai_core::error::AppError;
use hireai_entity::identity::model::{COMPANY_KEY, ROLE_KEY};
use hireai_entity::identity::{ExternalIdentity, Metadata, RoleSources};
use hireai_entity::user::{UserRole, UserView};

use crate::backend::BackendApi;
use crate::config::ClientConfig;
use crate::session::{ExternalSession, Navigator};

use super::state::{AuthPhase, AuthSnapshot, CoordinatorState, Readiness};

/// Drives the client from an external sign-in to a first-party session and
/// back out again.
pub struct AuthCoordinator {
    session: Arc<dyn ExternalSession>,
    backend: Arc<dyn BackendApi>,
    navigator: Arc<dyn Navigator>,
    settle_delay: Duration,
    initialized: AtomicBool,
    logout_in_progress: AtomicBool,
    generation: AtomicU64,
    state: Mutex<CoordinatorState>,
}

impl std::fmt::Debug for AuthCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthCoordinator")
            .field("settle_delay", &self.settle_delay)
            .field("initialized", &self.initialized)
            .field("logout_in_progress", &self.logout_in_progress)
            .field("generation", &self.generation)
            .finish()
    }
}

impl AuthCoordinator {
    pub fn new(
        session: Arc<dyn ExternalSession>,
        backend: Arc<dyn BackendApi>,
        navigator: Arc<dyn Navigator>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            session,
            backend,
            navigator,
            settle_delay: config.settle_delay(),
            initialized: AtomicBool::new(false),
            logout_in_progress: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            state: Mutex::new(CoordinatorState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CoordinatorState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.lock().snapshot()
    }

    pub fn phase(&self) -> AuthPhase {
        self.lock().phase
    }

    pub fn clear_error(&self) {
        self.lock().auth_error = None;
    }

    /// React to the external session's current state.
    ///
    /// Safe to call on every re-evaluation: only the first call after a
    /// sign-in performs the backend exchange.
    pub async fn sync(&self) {
        if self.logout_in_progress.load(Ordering::SeqCst) {
            return;
        }
        let generation = self.generation.load(Ordering::SeqCst);

        let signed_in = self.session.is_signed_in().await;
        if self.superseded(generation) {
            return;
        }

        if !signed_in {
            self.initialized.store(false, Ordering::SeqCst);
            self.generation.fetch_add(1, Ordering::SeqCst);
            self.lock().clear(AuthPhase::Ready(Readiness::Anonymous));
            return;
        }

        if self
            .initialized
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        {
            let mut state = self.lock();
            if self.superseded(generation) {
                self.initialized.store(false, Ordering::SeqCst);
                return;
            }
            state.phase = AuthPhase::Initializing;
            state.auth_error = None;
        }

        let result = self.initialize(generation).await;

        let mut state = self.lock();
        if self.superseded(generation) {
            debug!("Discarding initialization result superseded by a logout");
            self.initialized.store(false, Ordering::SeqCst);
            return;
        }

        match result {
            Ok((role, backend_user)) => {
                info!(role = %role, degraded = backend_user.is_none(), "Auth initialized");
                state.phase = AuthPhase::Ready(Readiness::Authenticated);
                state.role = Some(role);
                state.backend_user = backend_user;
            }
            Err(e) => {
                warn!(error = %e, "Auth initialization failed");
                state.phase = AuthPhase::Uninitialized;
                state.auth_error = Some(e.message);
                self.initialized.store(false, Ordering::SeqCst);
            }
        }
    }

    /// A logout started, or the sign-in changed, since `generation` was read.
    fn superseded(&self, generation: u64) -> bool {
        self.logout_in_progress.load(Ordering::SeqCst)
            || self.generation.load(Ordering::SeqCst) != generation
    }

    async fn initialize(&self, generation: u64) -> Result<(UserRole, Option<UserView>), AppError> {
        let token = self
            .session
            .session_token()
            .await?
            .ok_or_else(|| AppError::unauthorized("No session token available"))?;
        let identity = self.session.identity().await;

        if self.superseded(generation) {
            return Err(AppError::unauthorized("Session ended during initialization"));
        }

        match self.backend.login(&token).await {
            Ok(login) => {
                let role = derive_role(identity.as_ref(), Some(login.user.role));
                Ok((role, Some(login.user)))
            }
            Err(e) => {
                warn!(error = %e, "Backend login failed; falling back to identity metadata");
                Ok((derive_role(identity.as_ref(), None), None))
            }
        }
    }

    /// Re-derive the role from identity metadata when no backend user is
    /// cached.
    pub async fn refresh_role(&self) {
        if self.logout_in_progress.load(Ordering::SeqCst) {
            return;
        }
        {
            let state = self.lock();
            if state.phase != AuthPhase::Ready(Readiness::Authenticated)
                || state.backend_user.is_some()
            {
                return;
            }
        }

        let identity = self.session.identity().await;
        let role = derive_role(identity.as_ref(), None);

        let mut state = self.lock();
        if state.backend_user.is_none() && state.role != Some(role) {
            debug!(role = %role, "Role updated from identity metadata");
            state.role = Some(role);
        }
    }

    /// Record a role choice in the low-trust metadata tier.
    pub async fn update_role(
        &self,
        role: UserRole,
        company_name: Option<&str>,
    ) -> Result<(), AppError> {
        let mut metadata = Metadata::new();
        metadata.insert(ROLE_KEY.to_string(), Value::String(role.as_str().to_string()));
        if role == UserRole::Interviewer {
            if let Some(company) = company_name.map(str::trim).filter(|c| !c.is_empty()) {
                metadata.insert(COMPANY_KEY.to_string(), Value::String(company.to_string()));
            }
        }

        match self.session.update_unsafe_metadata(metadata).await {
            Ok(()) => {
                info!(role = %role, "User role updated");
                self.lock().role = Some(role);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to update user role");
                self.lock().auth_error = Some(e.message.clone());
                Err(e)
            }
        }
    }

    /// Sign out of both the backend and the identity provider.
    ///
    /// Each remote step is best-effort. Overlapping calls are ignored.
    pub async fn logout(&self) {
        if self.logout_in_progress.swap(true, Ordering::SeqCst) {
            debug!("Logout already in progress");
            return;
        }

        self.initialized.store(false, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.lock().clear(AuthPhase::LoggingOut);

        if let Err(e) = self.backend.logout().await {
            warn!(error = %e, "Backend logout failed");
        }
        if let Err(e) = self.session.sign_out().await {
            warn!(error = %e, "Identity provider sign-out failed");
        }
        self.navigator.go_to_landing();

        tokio::time::sleep(self.settle_delay).await;

        self.lock().phase = AuthPhase::Uninitialized;
        self.logout_in_progress.store(false, Ordering::SeqCst);
        info!("Logout complete");
    }
}

/// Role precedence shared with the server: high-trust metadata, low-trust
/// metadata, backend role, then candidate.
pub(crate) fn derive_role(identity: Option<&ExternalIdentity>, backend: Option<UserRole>) -> UserRole {
    let sources = identity.map(ExternalIdentity::role_sources).unwrap_or_default();
    RoleSources { backend, ..sources }.resolve()
}

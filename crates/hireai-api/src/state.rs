//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use hireai_auth::idp::IdentityProvider;
use hireai_auth::reconcile::{ProfileProvisioner, UserReconciler};
use hireai_auth::session::SessionIssuer;
use hireai_auth::webhook::SignatureVerifier;
use hireai_auth::guard::SessionGuard;
use hireai_core::config::AppConfig;
use hireai_core::error::AppError;
use hireai_database::store::{ProfileStore, UserStore};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Storage ──────────────────────────────────────────────
    pub users: Arc<dyn UserStore>,
    pub profiles: Arc<dyn ProfileStore>,

    // ── Identity ─────────────────────────────────────────────
    pub verifier: Arc<SignatureVerifier>,
    pub reconciler: Arc<UserReconciler>,
    pub session_guard: Arc<SessionGuard>,

    // ── Sessions ─────────────────────────────────────────────
    /// Owns the login dedup map; one instance per process.
    pub session_issuer: Arc<SessionIssuer>,
}

impl AppState {
    /// Wire the identity subsystem over the given stores and provider.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        profiles: Arc<dyn ProfileStore>,
        identity_provider: Arc<dyn IdentityProvider>,
    ) -> Result<Self, AppError> {
        let verifier = SignatureVerifier::from_config(&config.webhook)?;
        if !verifier.is_configured() {
            tracing::warn!("webhook.secret is not set; all webhook deliveries will be rejected");
        }

        let reconciler = UserReconciler::new(
            Arc::clone(&users),
            ProfileProvisioner::new(Arc::clone(&profiles)),
        );
        let session_guard =
            SessionGuard::new(identity_provider, Arc::clone(&users), reconciler.clone());
        let session_issuer = SessionIssuer::from_config(&config.auth);

        Ok(Self {
            config: Arc::new(config),
            users,
            profiles,
            verifier: Arc::new(verifier),
            reconciler: Arc::new(reconciler),
            session_guard: Arc::new(session_guard),
            session_issuer: Arc::new(session_issuer),
        })
    }
}

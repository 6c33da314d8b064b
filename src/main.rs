//! HireAI Server: identity federation and session issuance.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use hireai_api::{AppState, build_app};
use hireai_auth::{HttpIdentityProvider, IdentityProvider, StaticIdentityProvider};
use hireai_core::config::{AppConfig, StoreBackend};
use hireai_core::error::AppError;
use hireai_database::store::{ProfileStore, UserStore};
use hireai_database::{
    DatabasePool, MemoryProfileStore, MemoryUserStore, ProfileRepository, UserRepository,
};

#[tokio::main]
async fn main() {
    let env = std::env::var("HIREAI_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting HireAI v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Storage backend ──────────────────────────────────
    let mut db_pool = None;
    let (users, profiles): (Arc<dyn UserStore>, Arc<dyn ProfileStore>) =
        match config.database.backend {
            StoreBackend::Postgres => {
                let db = DatabasePool::open(&config.database).await?;

                let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(db.pool().clone()));
                let profiles: Arc<dyn ProfileStore> =
                    Arc::new(ProfileRepository::new(db.pool().clone()));
                db_pool = Some(db);
                (users, profiles)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; data is lost on restart");
                let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
                let profiles: Arc<dyn ProfileStore> = Arc::new(MemoryProfileStore::new());
                (users, profiles)
            }
        };

    // ── Step 2: Identity provider ────────────────────────────────
    let identity_provider: Arc<dyn IdentityProvider> =
        if config.identity_provider.jwt_public_key.trim().is_empty() {
            tracing::warn!(
                "identity_provider.jwt_public_key is not set; bearer credentials will be rejected"
            );
            Arc::new(StaticIdentityProvider::new())
        } else {
            Arc::new(HttpIdentityProvider::new(&config.identity_provider)?)
        };

    // ── Step 3: Application state ────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(config, users, profiles, identity_provider)?;

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("HireAI server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 5: Drain ────────────────────────────────────────────
    if let Some(db) = db_pool {
        if tokio::time::timeout(grace, db.close()).await.is_err() {
            tracing::warn!("Database pool did not close within the grace period");
        }
    }

    tracing::info!("HireAI server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

//! # hireai-api
//!
//! HTTP API layer for HireAI built on Axum.
//!
//! Provides the identity webhook endpoint, the session login/logout/me
//! endpoints, user registration, health, and the middleware stack (CORS,
//! tracing, request logging).

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;

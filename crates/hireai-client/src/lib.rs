//! # hireai-client
//!
//! Client side of the HireAI sign-in flow: the auth coordinator state
//! machine, the seams it drives (external session, backend, navigation), and
//! a `reqwest` backend client that keeps the session cookie.

pub mod backend;
pub mod config;
pub mod coordinator;
pub mod session;

pub use backend::{BackendApi, BackendClient, BackendLogin};
pub use config::ClientConfig;
pub use coordinator::{AuthCoordinator, AuthPhase, AuthSnapshot, Readiness};
pub use session::{ExternalSession, Navigator};

//! Client auth state machine.

mod machine;
mod state;

pub use machine::AuthCoordinator;
pub use state::{AuthPhase, AuthSnapshot, Readiness};

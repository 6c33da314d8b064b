//! Reconciliation of external identities onto local users and role profiles.

pub mod provisioner;
pub mod reconciler;

pub use provisioner::ProfileProvisioner;
pub use reconciler::{ReconcileOutcome, Registration, UserReconciler};

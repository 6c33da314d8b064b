//! # hireai-auth
//!
//! Identity federation and first-party sessions for HireAI.
//!
//! ## Modules
//!
//! - `webhook`: signature verification for inbound identity events
//! - `reconcile`: idempotent mapping of external identities onto local users and profiles
//! - `session`: session token minting, cookie policy and login deduplication
//! - `idp`: the external identity provider seam
//! - `guard`: bearer verification with lazy local user creation

pub mod guard;
pub mod idp;
pub mod reconcile;
pub mod session;
pub mod webhook;

pub use guard::{GuardedIdentity, SessionGuard};
pub use idp::{HttpIdentityProvider, IdentityProvider, StaticIdentityProvider, VerifiedSession};
pub use reconcile::{ProfileProvisioner, ReconcileOutcome, Registration, UserReconciler};
pub use session::{LoginOutcome, SessionClaims, SessionIssuer};
pub use webhook::{SignatureRejection, SignatureVerifier};

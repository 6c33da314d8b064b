//! External identity payloads and metadata resolution.

pub mod event;
pub mod model;
pub mod precedence;

pub use event::{EventKind, WebhookEvent};
pub use model::{EmailAddress, ExternalIdentity, Metadata, Verification};
pub use precedence::{RoleSources, first_present};

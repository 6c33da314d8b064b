//! The external identity provider seam.

pub mod http;
pub mod provider;
pub mod static_provider;

pub use http::HttpIdentityProvider;
pub use provider::{IdentityProvider, VerifiedSession};
pub use static_provider::StaticIdentityProvider;

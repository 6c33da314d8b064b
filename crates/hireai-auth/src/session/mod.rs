//! First-party session tokens and the cookie that carries them.

pub mod claims;
pub mod cookie;
pub mod dedup;
pub mod issuer;
pub mod token;

pub use claims::SessionClaims;
pub use cookie::SessionCookiePolicy;
pub use dedup::LoginDeduplicator;
pub use issuer::{LoginOutcome, SessionIssuer};
pub use token::SessionTokenCodec;

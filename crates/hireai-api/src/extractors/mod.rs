//! Custom extractors for authenticated requests.

pub mod bearer;
pub mod session;

pub use bearer::GuardedUser;
pub use session::SessionUser;

//! PostgreSQL-backed store implementations.

pub mod profile;
pub mod user;

pub use profile::ProfileRepository;
pub use user::UserRepository;

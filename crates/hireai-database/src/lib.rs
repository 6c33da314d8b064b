//! # hireai-database
//!
//! PostgreSQL connection management, the [`UserStore`] / [`ProfileStore`]
//! abstractions, and their PostgreSQL and in-memory implementations.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::{MemoryProfileStore, MemoryUserStore};
pub use repositories::{ProfileRepository, UserRepository};
pub use store::{ProfileStore, UserStore};

//! # sso-database
//!
//! The store contracts the authorization layer depends on, their
//! PostgreSQL implementations, the migration runner, and an in-memory
//! store for tests and local experiments.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{ApplicationStore, PermissionStore, UserStore};

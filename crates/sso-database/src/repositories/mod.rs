//! PostgreSQL implementations of the store contracts.

pub mod application;
pub mod permission;
pub mod user;

pub use application::ApplicationRepository;
pub use permission::PermissionRepository;
pub use user::UserRepository;

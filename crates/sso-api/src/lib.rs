//! # sso-api
//!
//! HTTP API layer for the SSO service built on Axum.
//!
//! Provides the auth and permission endpoints, bearer-token extraction,
//! request logging, per-request timeouts, and the mapping from
//! `AppError` kinds to HTTP statuses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod telemetry;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;

//! Application builder: wires repositories, services, and the router into
//! a running server.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use sso_auth::{PasswordHasher, TokenCodec};
use sso_core::config::AppConfig;
use sso_core::error::{AppError, ErrorKind};
use sso_database::DatabasePool;
use sso_database::repositories::{ApplicationRepository, PermissionRepository, UserRepository};
use sso_service::AuthService;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> axum::Router {
    build_router(state)
}

/// Builds the auth service on top of the PostgreSQL repositories.
pub fn build_auth_service(config: &AppConfig, db_pool: &DatabasePool) -> Result<AuthService, AppError> {
    let pool = db_pool.pool().clone();

    Ok(AuthService::new(
        Arc::new(UserRepository::new(pool.clone())),
        Arc::new(ApplicationRepository::new(pool.clone())),
        Arc::new(PermissionRepository::new(pool)),
        Arc::new(PasswordHasher::new(&config.auth)?),
        Arc::new(TokenCodec::new()),
        config.auth.token_ttl()?,
    ))
}

/// Runs the SSO server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig, db_pool: DatabasePool) -> Result<(), AppError> {
    let auth = build_auth_service(&config, &db_pool)?;
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = AppState::new(config, auth, Some(db_pool.clone()));
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Infrastructure,
            format!("Failed to bind {addr}: {e}"),
            e,
        )
    })?;

    info!(address = %addr, "SSO server listening");

    let (signal_tx, mut signal_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = signal_tx.send(true);
    });
    let mut handle = tokio::spawn(server.into_future());

    // In-flight requests get `shutdown_grace_seconds` to finish once the
    // signal arrives.
    let finished = tokio::select! {
        joined = &mut handle => Some(joined),
        _ = signal_rx.changed() => None,
    };
    let joined = match finished {
        Some(joined) => joined,
        None => match tokio::time::timeout(grace, &mut handle).await {
            Ok(joined) => joined,
            Err(_) => {
                warn!(grace_seconds = grace.as_secs(), "Grace period elapsed, aborting open connections");
                handle.abort();
                db_pool.close().await;
                return Ok(());
            }
        },
    };

    joined
        .map_err(|e| AppError::with_source(ErrorKind::Infrastructure, "Server task failed", e))?
        .map_err(|e| {
            AppError::with_source(ErrorKind::Infrastructure, format!("Server error: {e}"), e)
        })?;

    db_pool.close().await;
    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

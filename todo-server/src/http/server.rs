//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C, then pool close

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::repos::PgTodoRepository;
use crate::service::{TodoService, DEFAULT_TIMEOUT};

/// Origins allowed when CORS is not permissive
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8080)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    pub cors_permissive: bool,

    /// Bound on each use-case operation
    pub timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cors_permissive: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub todos: TodoService,
}

impl AppState {
    pub fn new(todos: TodoService) -> Self {
        Self { todos }
    }
}

fn cors_layer(permissive: bool) -> CorsLayer {
    if permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(LOCAL_ORIGINS.map(HeaderValue::from_static))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the application router with all routes
pub fn build_router(state: AppState, cors_permissive: bool) -> Router {
    Router::new()
        .merge(routes::todos::router())
        .layer(cors_layer(cors_permissive))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal, then close the pool.
///
/// # Example
///
/// ```ignore
/// let pool = db::connect(&DatabaseConfig::default()).await?;
/// run_server(pool, ServerConfig::default()).await?;
/// ```
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    let repo = Arc::new(PgTodoRepository::new(pool.clone()));
    let todos = TodoService::new(repo, config.timeout);
    let app = build_router(AppState::new(todos), config.cors_permissive);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        timeout_ms = config.timeout.as_millis() as u64,
        "Server listening on {}",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

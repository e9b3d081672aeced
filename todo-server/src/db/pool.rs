//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. Connecting verifies the
//! database is reachable before the server starts accepting requests.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 25;

/// Connections kept open while idle.
const MIN_CONNECTIONS: u32 = 5;

/// Connections are recycled after this long.
const MAX_LIFETIME: Duration = Duration::from_secs(5 * 60);

fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(MIN_CONNECTIONS.min(max_connections))
        .max_lifetime(MAX_LIFETIME)
}

/// Create a PostgreSQL connection pool from a connection descriptor.
///
/// # Errors
///
/// Returns an error if the SSL mode is invalid or the connection fails.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = config.connect_options()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        max_connections = config.max_connections,
        "connecting to PostgreSQL"
    );
    pool_options(config.max_connections)
        .connect_with(options)
        .await
}

/// Create a PostgreSQL connection pool from a connection string.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/todos").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with a custom connection limit.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    pool_options(max_connections).connect(database_url).await
}

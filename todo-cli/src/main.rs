mod tracing_setup;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use todo_server::{db, DatabaseConfig, ServerConfig};

use crate::tracing_setup::TracingConfig;

/// HTTP API for todo records backed by PostgreSQL
#[derive(Parser, Debug)]
#[command(name = "todod", version, about)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "TODO_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Per-operation timeout in seconds
    #[arg(long, env = "TODO_TIMEOUT_SECS", default_value_t = 3)]
    timeout_secs: u64,

    /// Create the todos table if it does not exist
    #[arg(long, env = "TODO_INIT_SCHEMA")]
    init_schema: bool,

    /// Allow any CORS origin instead of localhost only
    #[arg(long, env = "TODO_CORS_PERMISSIVE")]
    cors_permissive: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long)]
    debug: bool,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Args, Debug)]
struct DatabaseArgs {
    /// PostgreSQL host
    #[arg(long = "db-host", env = "DB_HOST", default_value = "localhost")]
    host: String,

    /// PostgreSQL port
    #[arg(long = "db-port", env = "DB_PORT", default_value_t = 5432)]
    port: u16,

    /// PostgreSQL user
    #[arg(long = "db-user", env = "DB_USER", default_value = "postgres")]
    user: String,

    /// PostgreSQL password
    #[arg(long = "db-password", env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Database name
    #[arg(long = "db-name", env = "DB_NAME", default_value = "todos")]
    name: String,

    /// TLS mode: disable, allow, prefer, require, verify-ca, verify-full
    #[arg(long = "db-sslmode", env = "DB_SSLMODE", default_value = "disable")]
    ssl_mode: String,

    /// Maximum pooled connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = db::DEFAULT_MAX_CONNECTIONS)]
    max_connections: u32,
}

impl From<DatabaseArgs> for DatabaseConfig {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            username: args.user,
            password: args.password,
            database: args.name,
            ssl_mode: args.ssl_mode,
            max_connections: args.max_connections,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables take precedence
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    let database = DatabaseConfig::from(cli.database);
    tracing::debug!(?database, "database configuration");

    let pool = db::connect(&database)
        .await
        .with_context(|| format!("failed to connect to PostgreSQL at {}:{}", database.host, database.port))?;

    if cli.init_schema {
        db::schema::ensure(&pool)
            .await
            .context("failed to create todos schema")?;
    }

    let config = ServerConfig {
        bind_addr: cli.bind,
        cors_permissive: cli.cors_permissive,
        timeout: Duration::from_secs(cli.timeout_secs),
    };

    todo_server::run_server(pool, config)
        .await
        .context("server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_map_onto_database_config() {
        let cli = Cli::try_parse_from([
            "todod",
            "--db-host",
            "db.internal",
            "--db-port",
            "6543",
            "--db-name",
            "tasks",
            "--db-sslmode",
            "require",
            "--timeout-secs",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.timeout_secs, 5);
        let config = DatabaseConfig::from(cli.database);
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.database, "tasks");
        assert_eq!(config.ssl_mode, "require");
    }
}

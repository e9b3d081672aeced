//! Connection descriptor for the todo store

use std::fmt;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::db::DEFAULT_MAX_CONNECTIONS;

/// PostgreSQL connection settings, used once at startup.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    /// One of disable, allow, prefer, require, verify-ca, verify-full
    pub ssl_mode: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: String::new(),
            database: "todos".to_string(),
            ssl_mode: "disable".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// Build sqlx connect options.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error::Configuration` for an unknown SSL mode.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let ssl_mode: PgSslMode = self.ssl_mode.parse()?;
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .database(&self.database)
            .ssl_mode(ssl_mode);

        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        Ok(options)
    }
}

// Keep the password out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

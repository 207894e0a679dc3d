//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `COOKBOOK_*` environment variables and an
//! optional configuration file, in OrthoConfig's usual precedence order.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RUN_MIGRATIONS: bool = true;

/// Runtime configuration for the cookbook server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COOKBOOK")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without it recipes live in process memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connect_timeout_secs: Option<u64>,
    /// Apply embedded migrations before serving. Defaults to `true`.
    pub run_migrations: Option<bool>,
}

impl ServerSettings {
    /// Interface to bind, `0.0.0.0` unless configured.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Port to bind, `8080` unless configured.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Whether embedded migrations run at startup.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(DEFAULT_RUN_MIGRATIONS)
    }

    /// Resolve the bind address.
    ///
    /// # Errors
    ///
    /// Returns an [`std::io::Error`] of kind `InvalidInput` when the host is
    /// not an IP address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        format!("{}:{}", self.host(), self.port())
            .parse()
            .map_err(|err| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("invalid bind address {}:{}: {err}", self.host(), self.port()),
                )
            })
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_deref().map(|url| {
            PoolConfig::new(url)
                .with_max_size(self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS))
                .with_connection_timeout(Duration::from_secs(
                    self.db_connect_timeout_secs
                        .unwrap_or(DEFAULT_DB_CONNECT_TIMEOUT_SECS),
                ))
        })
    }
}

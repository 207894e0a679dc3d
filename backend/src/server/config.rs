//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use cookbook::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration that keeps recipes in process memory.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, the recipe catalogue is backed by PostgreSQL instead of
    /// the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "read by bootstrap tests only")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Whether a database pool is attached.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "read by bootstrap tests only")
    )]
    #[must_use]
    pub fn has_db_pool(&self) -> bool {
        self.db_pool.is_some()
    }
}

//! HTTP server configuration object and helpers.

use community::inbound::http::session_config::SessionSettings;
use community::outbound::persistence::DbPool;
use std::net::SocketAddr;
use url::Url;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) public_url: Url,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration that keeps data in memory.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, public_url: Url) -> Self {
        Self {
            session,
            bind_addr,
            public_url,
            db_pool: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// With a pool the server stores accounts, opportunities and applications
    /// in PostgreSQL; without one it uses the in-memory adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

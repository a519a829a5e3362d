//! Process configuration loaded via OrthoConfig.
//!
//! Values come from `COMMUNITY_*` environment variables, an optional
//! configuration file and command-line flags, in OrthoConfig's usual
//! precedence. Session cookie settings are read separately; see
//! [`crate::inbound::http::session_config`].

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:8080";

/// A configured value that could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("COMMUNITY_BIND_ADDR must be a socket address, got {value:?}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("COMMUNITY_PUBLIC_URL must be an absolute URL, got {value:?}")]
    PublicUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Settings for the HTTP server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COMMUNITY")]
pub struct AppSettings {
    /// Address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps data in memory.
    pub database_url: Option<String>,
    /// Externally visible base URL, used for verification links and the
    /// WebSocket origin check.
    pub public_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
}

impl AppSettings {
    /// Parsed listen address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the configured value is not a
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Parsed public base URL, falling back to `http://localhost:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::PublicUrl`] when the configured value is not
    /// an absolute URL.
    pub fn public_url(&self) -> Result<Url, SettingsError> {
        let value = self.public_url.as_deref().unwrap_or(DEFAULT_PUBLIC_URL);
        Url::parse(value).map_err(|source| SettingsError::PublicUrl {
            value: value.to_owned(),
            source,
        })
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        Some(PoolConfig::new(url).with_max_size(self.pool_max_size))
    }
}

//! Server settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `STAYBOOK_*` environment variables over an
//! optional config file. Identity secrets are not here; see
//! [`crate::inbound::http::identity_config`].

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Listener and storage settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STAYBOOK")]
pub struct ServerSettings {
    /// Socket address to listen on.
    #[ortho_config(default = "0.0.0.0:8080".to_owned())]
    pub bind_addr: String,
    /// PostgreSQL connection URL. Unset runs on in-memory storage.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_size: u32,
}

/// The configured bind address could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid bind address `{value}`: {message}")]
pub struct BindAddrError {
    pub value: String,
    pub message: String,
}

impl ServerSettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`BindAddrError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, BindAddrError> {
        let raw = self.bind_addr.as_str();
        raw.trim().parse().map_err(|err: std::net::AddrParseError| BindAddrError {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Database URL, treating a blank value as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_size(&self) -> u32 {
        self.pool_size.max(1)
    }
}

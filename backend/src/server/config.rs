//! Start-up configuration handed to [`super::create_server`].

use std::net::SocketAddr;

use staybook::inbound::http::identity_config::IdentitySettings;
use staybook::outbound::persistence::DbPool;

/// Everything the server needs once settings and secrets are resolved.
pub struct ServerConfig {
    pub(crate) identity: IdentitySettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(identity: IdentitySettings, bind_addr: SocketAddr) -> Self {
        Self {
            identity,
            bind_addr,
            db_pool: None,
        }
    }

    /// Use PostgreSQL repositories instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

//! Staybook entry point: load settings, resolve the signing secret, pick
//! storage and serve the HTTP API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use staybook::inbound::http::health::HealthState;
use staybook::inbound::http::identity_config::{
    BuildMode, SecretSource, identity_settings_from_env,
};
use staybook::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use staybook::settings::ServerSettings;

use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let identity = identity_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    match identity.secret.source() {
        SecretSource::File(path) => info!(
            path = %path.display(),
            fingerprint = %identity.secret.fingerprint(),
            "loaded token signing secret"
        ),
        SecretSource::Ephemeral => warn!(
            fingerprint = %identity.secret.fingerprint(),
            "using ephemeral token signing secret; tokens will not survive a restart"
        ),
    }

    let mut config = ServerConfig::new(identity, bind_addr);
    if let Some(url) = settings.database_url() {
        run_pending_migrations(url)
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_size()))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "staybook listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}

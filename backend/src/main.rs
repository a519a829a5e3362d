//! Community server entry-point: loads settings, prepares the store and runs
//! the HTTP server.

mod server;

use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use community::inbound::http::session_config::{BuildMode, session_settings_from_env};
use community::outbound::persistence::{DbPool, run_migrations};
use community::settings::AppSettings;
use server::{ServerConfig, create_server, health_state_for};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let public_url = settings.public_url().map_err(std::io::Error::other)?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::current())
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(session, bind_addr, public_url);
    if let Some(pool_config) = settings.pool_config() {
        let database_url = pool_config.database_url().to_owned();
        let applied = actix_web::rt::task::spawn_blocking(move || run_migrations(&database_url))
            .await
            .map_err(|e| std::io::Error::other(format!("migration task failed: {e}")))?
            .map_err(std::io::Error::other)?;
        info!(applied, "database migrations up to date");

        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = health_state_for(&config);
    info!(%bind_addr, "starting server");
    let server = create_server(health_state, config)?;
    server.await
}

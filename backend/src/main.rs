//! Backend entry-point: loads settings, prepares storage, and serves the API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recipe_backend::inbound::http::health::HealthState;
use recipe_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use recipe_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

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

    let settings =
        ServerSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(session, bind_addr);
    if let Some(url) = settings.database_url() {
        if settings.run_migrations {
            run_pending_migrations(url)
                .await
                .map_err(std::io::Error::other)?;
        }
        let pool = DbPool::new(
            PoolConfig::new(url).with_max_size(settings.db_max_connections()),
        )
        .await
        .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    info!(%bind_addr, "starting server");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

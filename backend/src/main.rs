//! Cookbook entry-point: loads settings, prepares the store and serves the API.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cookbook::inbound::http::health::HealthState;
use cookbook::outbound::persistence::{DbPool, run_migrations};
use cookbook::settings::ServerSettings;
use ortho_config::OrthoConfig;

use server::{ServerConfig, create_server};

/// Build the server configuration, connecting to PostgreSQL when configured.
async fn build_server_config(settings: &ServerSettings) -> std::io::Result<ServerConfig> {
    let config = ServerConfig::new(settings.bind_addr()?);
    let Some(pool_config) = settings.pool_config() else {
        return Ok(config);
    };

    if settings.run_migrations() {
        run_migrations(pool_config.database_url())
            .await
            .map_err(|e| std::io::Error::other(format!("database migration failed: {e}")))?;
    }

    let pool = DbPool::new(pool_config)
        .await
        .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
    Ok(config.with_db_pool(pool))
}

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

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = build_server_config(&settings).await?;
    let bind_addr = config.bind_addr;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "cookbook listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}

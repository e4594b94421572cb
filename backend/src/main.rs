//! Backend entry-point: loads configuration, prepares storage and serves HTTP.

use actix_web::web;
use color_eyre::eyre::WrapErr;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use inventory_backend::inbound::http::health::HealthState;
use inventory_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use inventory_backend::outbound::persistence::{DbPool, run_pending_migrations};
use inventory_backend::server::{ServerConfig, create_server};
use inventory_backend::settings::AppSettings;

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let settings = AppSettings::load_from_args(std::env::args_os())?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;

    let mut config = ServerConfig::new(session, settings.bind_address(), settings.mirror_dir());
    if let Some(pool_config) = settings.pool_config() {
        run_pending_migrations(pool_config.database_url())
            .await
            .wrap_err("database migrations failed")?;
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("database pool could not be built")?;
        config = config.with_db_pool(pool);
    } else {
        info!("no database configured; using in-memory stores");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start server")?;
    server.await.wrap_err("server terminated with an error")
}

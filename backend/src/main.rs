//! Service entry-point: loads configuration, installs logging, and serves HTTP.

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use di_demo::config::AppSettings;
use di_demo::inbound::http::health::HealthState;
use di_demo::server::{BoundServer, ServerConfig, create_server};
use ortho_config::OrthoConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let app_settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| eyre!("failed to load configuration: {e}"))?;
    let bind_addr = app_settings.bind_addr()?;

    let config = ServerConfig::new(bind_addr)
        .with_settings(app_settings.settings())
        .with_docs(app_settings.docs_enabled());

    let health_state = web::Data::new(HealthState::new());
    let BoundServer { server, local_addr } =
        create_server(health_state, config).wrap_err("failed to start HTTP server")?;

    info!(
        %local_addr,
        app_name = app_settings.app_name(),
        version = app_settings.version(),
        "serving dependency injection demo"
    );
    server.await.wrap_err("HTTP server terminated with an error")
}

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};

use dc_api::app::{create_app, AppState, Dependencies};
use dc_api::config;
use dc_shared::{Environment, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let logging = LoggingConfig::for_environment(Environment::from_env());
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(logging.level.as_str()),
    )
    .format_module_path(logging.source_location)
    .init();

    let config = config::load().context("failed to load configuration")?;

    info!(
        "Starting DarahConnect API v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    let infra = dc_infra::initialize(&config)
        .await
        .context("failed to initialize infrastructure")?;

    if let Err(e) = infra.database.run_migrations().await {
        warn!("Migrations were not applied: {}", e);
    }

    let state = web::Data::new(AppState::new(Dependencies::from(infra), &config));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}

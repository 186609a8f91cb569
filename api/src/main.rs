use actix_web::{web, HttpServer};
use anyhow::Context;

use om_api::app::{build_app_state, create_app};
use om_api::telemetry::init_tracing;
use om_infra::config::load_config;
use om_shared::EmailProvider;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env and read configuration
    let config = load_config();

    init_tracing(&config.logging).context("Failed to initialize tracing")?;

    tracing::info!(environment = %config.environment, "Starting OtpMail API Server");

    if config.environment.is_production() && config.email.provider == EmailProvider::Mock {
        tracing::warn!("EMAIL_PROVIDER is mock in production, passcodes will not be delivered");
    }

    let infrastructure = om_infra::initialize(&config)
        .await
        .context("Failed to initialize infrastructure services")?;

    if let Err(e) = infrastructure.health_check().await {
        tracing::warn!(error = %e, "Infrastructure health check failed at startup");
    }

    let app_state = web::Data::new(build_app_state(&infrastructure, &config));
    let infrastructure = web::Data::new(infrastructure);
    let shutdown_handle = infrastructure.clone();

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let workers = config.server.workers;
    let app_config = config;

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &app_config).app_data(infrastructure.clone())
    });
    if workers > 0 {
        server = server.workers(workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await;

    tracing::info!("Server stopped");
    shutdown_handle.shutdown().await;

    result.context("Server terminated with an error")
}

//! Application state and factory
//!
//! This module wires infrastructure services into the OTP manager and
//! provides the factory for creating the Actix-web application.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error, HttpResponse};
use tracing_actix_web::TracingLogger;

use om_core::repositories::OtpRepository;
use om_core::services::{
    DeliveryPolicy, NotificationTemplates, NotifierTrait, OtpCacheTrait, OtpManager,
    OtpServiceConfig,
};
use om_infra::InfrastructureServices;
use om_shared::{AppConfig, OtpResponse};

use crate::handlers::json_error_handler;
use crate::middleware::create_cors;
use crate::routes::otp::{issue_otp, verify_otp, AppState};

/// State used by the binary, backed by whichever implementations were configured
pub type DynAppState = AppState<dyn OtpRepository, dyn OtpCacheTrait, dyn NotifierTrait>;

/// Build the OTP manager from infrastructure services and configuration
pub fn build_app_state(infrastructure: &InfrastructureServices, config: &AppConfig) -> DynAppState {
    let otp_manager = OtpManager::new(
        infrastructure.repository.clone(),
        infrastructure.cache.clone(),
        infrastructure.notifier.clone(),
        infrastructure.renderer.clone(),
        OtpServiceConfig::from(&config.otp),
    )
    .with_templates(NotificationTemplates::from_config(&config.otp))
    .with_delivery_policy(DeliveryPolicy::from_config(&config.otp));

    AppState::new(otp_manager)
}

/// Create and configure the application with all dependencies
pub fn create_app<R, C, N>(
    app_state: web::Data<AppState<R, C, N>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    R: OtpRepository + ?Sized + 'static,
    C: OtpCacheTrait + ?Sized + 'static,
    N: NotifierTrait + ?Sized + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Request spans first, then CORS
        .wrap(create_cors(&config.cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/otp")
                    .route("/issue", web::post().to(issue_otp::<R, C, N>))
                    .route("/verify", web::post().to(verify_otp::<R, C, N>)),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// Checks MySQL and Redis when the infrastructure container is registered.
async fn health_check(infrastructure: Option<web::Data<InfrastructureServices>>) -> HttpResponse {
    if let Some(infrastructure) = infrastructure {
        if let Err(e) = infrastructure.health_check().await {
            tracing::error!(error = %e, "Health check failed");
            return HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "service": "otp-mail-api",
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }));
        }
    }

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "otp-mail-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(OtpResponse::failed_with_message(
        "The requested resource was not found",
    ))
}

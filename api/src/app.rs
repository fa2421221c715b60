//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    web, App, HttpResponse,
};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use sg_core::services::{CaptchaCache, Clock, SystemClock, VerificationService};
use sg_infra::database::create_repository;
use sg_infra::email::create_mail_transport;
use sg_infra::sms::create_sms_transport;
use sg_shared::config::{CorsConfig, RateLimitConfig};
use sg_shared::errors::{error_codes, ErrorResponse};
use sg_shared::types::HealthResponse;

use crate::config::Config;
use crate::middleware::{create_cors, RateLimitStore};
use crate::routes;

const SERVICE_NAME: &str = "shinegold-verification-api";

/// Application state that holds shared services
pub struct AppState {
    pub verification: Arc<VerificationService>,
}

impl AppState {
    pub fn new(verification: Arc<VerificationService>) -> Self {
        Self { verification }
    }
}

/// Wire the store and transports selected by configuration into the engine
///
/// The captcha sweep is not started here; the binary owns that lifecycle.
pub async fn build_state(config: &Config) -> anyhow::Result<web::Data<AppState>> {
    let repository = create_repository(config.app.database.as_ref()).await?;
    let mail = create_mail_transport(&config.app.email)?;
    let sms = create_sms_transport(&config.app.sms);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let captchas = Arc::new(CaptchaCache::new(
        clock.clone(),
        config.verification.captcha_sweep_interval(),
    ));

    let service = VerificationService::new(
        repository,
        mail,
        sms,
        captchas,
        clock,
        config.verification.clone(),
    );

    Ok(web::Data::new(AppState::new(Arc::new(service))))
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    rate_limits: Arc<RateLimitStore>,
    limits: &RateLimitConfig,
    cors: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(json_config(max_payload_size))
        // Middleware order: CORS inside, request tracing outermost
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .configure(|cfg| routes::verification::configure(cfg, rate_limits, limits)),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// JSON extractor settings; malformed bodies become `VALIDATION_ERROR`
fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let message = err.to_string();
            let response = HttpResponse::BadRequest()
                .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message));
            InternalError::from_response(err, response).into()
        })
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
    ))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}

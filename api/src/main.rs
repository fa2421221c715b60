use actix_web::HttpServer;
use std::sync::Arc;

use sg_api::config::Config;
use sg_api::middleware::RateLimitStore;
use sg_api::telemetry::init_tracing;
use sg_api::{build_state, create_app};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_tracing(&config.app.logging);

    tracing::info!(
        environment = %config.app.environment,
        "Starting ShineGold verification API"
    );

    let state = build_state(&config).await?;
    let captchas = state.verification.captcha_cache().clone();
    captchas.start();

    let rate_limits = Arc::new(
        RateLimitStore::new(config.app.rate_limit.enabled)
            .with_trusted_proxies(config.app.rate_limit.trusted_proxies.clone()),
    );
    if !config.app.rate_limit.enabled {
        tracing::warn!("Rate limiting is disabled");
    }

    let bind_address = config.app.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let limits = config.app.rate_limit.clone();
    let cors = config.app.cors.clone();
    let max_payload_size = config.app.server.max_payload_size;

    let mut server = HttpServer::new(move || {
        create_app(
            state.clone(),
            rate_limits.clone(),
            &limits,
            &cors,
            max_payload_size,
        )
    });
    if config.app.server.workers > 0 {
        server = server.workers(config.app.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    captchas.stop();
    tracing::info!("Server stopped");
    Ok(())
}

//! Shared fixtures for route tests
#![allow(dead_code)]

use actix_web::web;
use std::sync::Arc;

use sg_api::config::verification_config;
use sg_api::AppState;
use sg_core::repositories::InMemoryVerificationCodeRepository;
use sg_core::services::{CaptchaCache, Clock, SystemClock, VerificationService};
use sg_infra::email::LoggingMailTransport;
use sg_infra::sms::LoggingSmsTransport;
use sg_shared::config::EmailConfig;

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub repository: InMemoryVerificationCodeRepository,
    pub mail: Arc<LoggingMailTransport>,
    pub sms: Arc<LoggingSmsTransport>,
}

impl TestContext {
    pub fn new() -> Self {
        let repository = InMemoryVerificationCodeRepository::new();
        let mail = Arc::new(LoggingMailTransport::new());
        let sms = Arc::new(LoggingSmsTransport::default());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let config = verification_config(&EmailConfig::default());
        let captchas = Arc::new(CaptchaCache::new(
            clock.clone(),
            config.captcha_sweep_interval(),
        ));

        let service = VerificationService::new(
            Arc::new(repository.clone()),
            mail.clone(),
            sms.clone(),
            captchas,
            clock,
            config,
        );

        Self {
            state: web::Data::new(AppState::new(Arc::new(service))),
            repository,
            mail,
            sms,
        }
    }

    /// Latest code issued to `target`
    pub async fn latest_code(&self, target: &str) -> String {
        self.repository
            .find_by_target(target)
            .await
            .into_iter()
            .max_by_key(|record| record.created_at)
            .map(|record| record.code)
            .expect("a code should have been issued")
    }
}

/// Answer drawn into a captcha SVG, one `<text>` element per character
pub fn answer_from_svg(svg: &str) -> String {
    svg.split("</text>")
        .filter_map(|part| part.rsplit('>').next())
        .filter(|glyph| glyph.chars().count() == 1)
        .collect()
}

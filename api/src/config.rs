use sg_core::services::VerificationServiceConfig;
use sg_shared::config::{AppConfig, EmailConfig};

/// Runtime configuration of the API binary
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub verification: VerificationServiceConfig,
}

impl Config {
    /// Load from the process environment
    ///
    /// Callers load `.env` first (see `main`).
    pub fn from_env() -> Self {
        let app = AppConfig::from_env();
        let verification = verification_config(&app.email);
        Self { app, verification }
    }

    pub fn is_development(&self) -> bool {
        self.app.environment.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.app.environment.is_production()
    }
}

impl Default for Config {
    fn default() -> Self {
        let app = AppConfig::default();
        let verification = verification_config(&app.email);
        Self { app, verification }
    }
}

/// Engine settings with brand and sender taken from the mail configuration
pub fn verification_config(email: &EmailConfig) -> VerificationServiceConfig {
    VerificationServiceConfig {
        brand_name: email.from_name.clone(),
        mail_from: email.from_address(),
        ..Default::default()
    }
}

//! Configuration for the verification service

use chrono::Duration;

use crate::domain::entities::verification_code::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Minimum seconds between code send requests for the same key
    pub resend_cooldown_seconds: i64,
    /// Number of seconds before a captcha expires
    pub captcha_expiration_seconds: i64,
    /// How often expired captchas are swept from the cache
    pub captcha_sweep_interval_seconds: u64,
    /// Number of characters rendered into a captcha
    pub captcha_length: usize,
    /// Brand shown in email subjects and bodies
    pub brand_name: String,
    /// Sender mailbox for verification emails, `"Name" <address>`
    pub mail_from: String,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            resend_cooldown_seconds: 60,
            captcha_expiration_seconds: 5 * 60,
            captcha_sweep_interval_seconds: 5 * 60,
            captcha_length: 4,
            brand_name: String::from("ShineGold"),
            mail_from: String::from("\"ShineGold\" <no-reply@shinegold.local>"),
        }
    }
}

impl VerificationServiceConfig {
    pub fn code_ttl(&self) -> Duration {
        Duration::minutes(self.code_expiration_minutes)
    }

    pub fn captcha_ttl(&self) -> Duration {
        Duration::seconds(self.captcha_expiration_seconds)
    }

    pub fn captcha_sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.captcha_sweep_interval_seconds)
    }
}

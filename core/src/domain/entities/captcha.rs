//! Captcha entities held in memory by the captcha cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached captcha answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaEntry {
    /// Lower-cased text rendered into the image
    pub code: String,

    /// Timestamp when the captcha expires
    pub expires_at: DateTime<Utc>,
}

impl CaptchaEntry {
    pub fn new(code: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            code: code.to_lowercase(),
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Case-insensitive comparison with a submitted answer
    pub fn matches(&self, submitted: &str) -> bool {
        self.code == submitted.to_lowercase()
    }
}

/// A freshly issued captcha returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptchaChallenge {
    /// Identifier to submit alongside the answer
    pub captcha_id: String,

    /// SVG markup of the rendered captcha
    pub captcha_image: String,
}

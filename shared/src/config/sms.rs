//! SMS transport configuration module

use serde::{Deserialize, Serialize};

/// SMS service configuration
///
/// Only the logging provider is wired; carrier integrations plug in behind the
/// same transport trait.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// SMS service provider ("log")
    pub provider: String,

    /// Sign prepended to message bodies, e.g. `[ShineGold]`
    #[serde(default = "default_sign_name")]
    pub sign_name: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: String::from("log"),
            sign_name: default_sign_name(),
        }
    }
}

impl SmsConfig {
    /// Load from `SMS_PROVIDER` and `SMS_SIGN_NAME`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("SMS_PROVIDER").unwrap_or(defaults.provider),
            sign_name: std::env::var("SMS_SIGN_NAME").unwrap_or(defaults.sign_name),
        }
    }
}

fn default_sign_name() -> String {
    String::from("ShineGold")
}

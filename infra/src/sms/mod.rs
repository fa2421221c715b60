//! SMS Service Module
//!
//! SMS transports for sending verification codes. Only the logging transport
//! is wired; carrier integrations implement the same `SmsTransport` trait.
//!
//! ## Features
//!
//! - **Logging Transport**: Writes masked deliveries to the log for development
//! - **Security**: Phone number masking in logs, codes only at debug level

use std::sync::Arc;

use sg_core::services::SmsTransport;

use crate::config::SmsConfig;

pub mod logging_sms;

pub use logging_sms::LoggingSmsTransport;


/// Create an SMS transport based on configuration
///
/// Unknown providers fall back to the logging transport with a warning.
///
/// # Arguments
///
/// * `config` - SMS configuration containing provider settings
pub fn create_sms_transport(config: &SmsConfig) -> Arc<dyn SmsTransport> {
    match config.provider.to_lowercase().as_str() {
        "log" | "mock" => Arc::new(LoggingSmsTransport::new(config.sign_name.clone())),
        other => {
            tracing::warn!(
                provider = other,
                "Unknown SMS provider, falling back to logging transport"
            );
            Arc::new(LoggingSmsTransport::new(config.sign_name.clone()))
        }
    }
}

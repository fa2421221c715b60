//! Email Service Module
//!
//! Mail transports for delivering verification codes:
//!
//! - **SMTP**: `SmtpMailTransport`, an async lettre relay (implicit TLS or STARTTLS)
//! - **Logging**: `LoggingMailTransport`, logs masked deliveries for development

use std::sync::Arc;

use sg_core::services::MailTransport;

use crate::config::{EmailConfig, EmailTransportKind};
use crate::InfrastructureError;

pub mod logging;
pub mod smtp;

pub use logging::LoggingMailTransport;
pub use smtp::SmtpMailTransport;

#[cfg(test)]
mod tests;

/// Create the mail transport selected by `EmailConfig::transport`
pub fn create_mail_transport(
    config: &EmailConfig,
) -> Result<Arc<dyn MailTransport>, InfrastructureError> {
    match config.transport {
        EmailTransportKind::Smtp => {
            if config.host.trim().is_empty() {
                return Err(InfrastructureError::Config(
                    "EMAIL_HOST is required for the SMTP transport".to_string(),
                ));
            }
            let transport = SmtpMailTransport::new(config)?;
            tracing::info!(
                host = %config.host,
                port = config.port,
                secure = config.secure,
                "Using SMTP mail transport"
            );
            Ok(Arc::new(transport))
        }
        EmailTransportKind::Log => {
            tracing::info!("Using logging mail transport, emails are not delivered");
            Ok(Arc::new(LoggingMailTransport::new()))
        }
    }
}

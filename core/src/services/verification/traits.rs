//! Traits for mail and SMS transport integration

use async_trait::async_trait;

/// An outgoing HTML email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Trait for mail transport integration
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver a message. The error string is logged, never shown to users.
    async fn send(&self, message: &MailMessage) -> Result<(), String>;
}

/// Trait for SMS transport integration
#[async_trait]
pub trait SmsTransport: Send + Sync {
    /// Send a verification code via SMS, returning the provider message id
    async fn send_code(&self, phone: &str, code: &str) -> Result<String, String>;
}

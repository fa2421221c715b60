//! SMTP mail transport

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use sg_core::services::{MailMessage, MailTransport};
use sg_shared::utils::mask_email;

use crate::config::EmailConfig;
use crate::InfrastructureError;

/// Sends HTML mail through an SMTP relay
///
/// `secure = true` connects with implicit TLS (port 465 style); otherwise the
/// session is upgraded with STARTTLS. Credentials are skipped for an empty user.
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| InfrastructureError::Mail(format!("Invalid SMTP relay: {}", e)))?;

        let mut builder = builder.port(config.port);
        if !config.user.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.user.clone(),
                config.pass.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }

    /// Build the lettre message for a `MailMessage`
    pub fn build_message(message: &MailMessage) -> Result<Message, String> {
        let from: Mailbox = message
            .from
            .parse()
            .map_err(|e| format!("Invalid sender address: {}", e))?;
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(message.html.clone())
            .map_err(|e| format!("Failed to build email: {}", e))
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, message: &MailMessage) -> Result<(), String> {
        let email = Self::build_message(message)?;

        let response = self
            .transport
            .send(email)
            .await
            .map_err(|e| format!("SMTP delivery failed: {}", e))?;

        tracing::debug!(
            recipient = %mask_email(&message.to),
            code = %response.code(),
            "SMTP relay accepted message"
        );
        Ok(())
    }
}

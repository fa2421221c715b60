//! Logging mail transport for local development

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

use sg_core::services::{MailMessage, MailTransport};
use sg_shared::utils::mask_email;

/// Logs outgoing mail instead of delivering it
#[derive(Debug, Default)]
pub struct LoggingMailTransport {
    message_count: AtomicU64,
}

impl LoggingMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MailTransport for LoggingMailTransport {
    async fn send(&self, message: &MailMessage) -> Result<(), String> {
        self.message_count.fetch_add(1, Ordering::SeqCst);

        tracing::info!(
            recipient = %mask_email(&message.to),
            subject = %message.subject,
            "Email delivered to log"
        );
        tracing::debug!(html = %message.html, "Email body");
        Ok(())
    }
}

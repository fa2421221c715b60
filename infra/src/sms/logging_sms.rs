//! Logging SMS transport for development
//!
//! Nothing leaves the process: each delivery is logged with the masked phone
//! number and counted. The code itself is only emitted at debug level.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use uuid::Uuid;

use sg_core::services::SmsTransport;
use sg_shared::utils::{is_valid_chinese_mobile, mask_phone_number};

/// SMS transport that writes messages to the log
pub struct LoggingSmsTransport {
    /// Sign prepended to the message body
    sign_name: String,
    /// Number of messages accepted
    message_count: AtomicU64,
    /// Reject every message (for exercising failure paths)
    simulate_failure: AtomicBool,
}

impl LoggingSmsTransport {
    pub fn new(sign_name: impl Into<String>) -> Self {
        Self {
            sign_name: sign_name.into(),
            message_count: AtomicU64::new(0),
            simulate_failure: AtomicBool::new(false),
        }
    }

    /// Make subsequent sends fail
    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    /// Number of messages accepted so far
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Message body as a carrier would receive it
    pub fn render(&self, code: &str) -> String {
        format!(
            "[{}] Your verification code is {}. Do not share it with anyone.",
            self.sign_name, code
        )
    }
}

impl Default for LoggingSmsTransport {
    fn default() -> Self {
        Self::new("ShineGold")
    }
}

#[async_trait]
impl SmsTransport for LoggingSmsTransport {
    async fn send_code(&self, phone: &str, code: &str) -> Result<String, String> {
        let masked = mask_phone_number(phone);

        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(format!("Simulated SMS failure for {}", masked));
        }

        if !is_valid_chinese_mobile(phone) {
            return Err(format!("Invalid phone number: {}", masked));
        }

        let message_id = format!("log_{}", Uuid::new_v4());
        self.message_count.fetch_add(1, Ordering::SeqCst);

        tracing::info!(
            recipient = %masked,
            message_id = %message_id,
            provider = "log",
            "SMS verification code delivered to log"
        );
        tracing::debug!(recipient = %masked, body = %self.render(code), "SMS body");

        Ok(message_id)
    }
}

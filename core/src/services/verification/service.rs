//! Main verification service implementation

use constant_time_eq::constant_time_eq;
use std::sync::Arc;
use uuid::Uuid;

use sg_shared::utils::{mask_email, mask_phone_number};

use crate::domain::entities::captcha::{CaptchaChallenge, CaptchaEntry};
use crate::domain::entities::verification_code::{
    VerificationCode, VerificationPurpose, VerificationType,
};
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::VerificationCodeRepository;

use super::captcha::{CaptchaCache, CaptchaGenerator};
use super::clock::Clock;
use super::config::VerificationServiceConfig;
use super::template;
use super::traits::{MailMessage, MailTransport, SmsTransport};
use super::types::{SendCodeResult, VerifyCodeCommand, VerifyCodeResult};

const EMAIL_SENT_MESSAGE: &str = "Verification code sent to your email";
const SMS_SENT_MESSAGE: &str = "Verification code sent to your phone";

/// Verification service issuing and checking email/SMS codes and captchas
pub struct VerificationService {
    /// Store for issued codes
    repository: Arc<dyn VerificationCodeRepository>,
    /// Mail transport for email codes
    mail: Arc<dyn MailTransport>,
    /// SMS transport for phone codes
    sms: Arc<dyn SmsTransport>,
    /// Captcha answers awaiting verification
    captchas: Arc<CaptchaCache>,
    clock: Arc<dyn Clock>,
    generator: CaptchaGenerator,
    config: VerificationServiceConfig,
}

impl VerificationService {
    /// Create a new verification service
    ///
    /// The captcha cache is shared with the caller, which owns its sweep
    /// lifecycle (`CaptchaCache::start` / `stop`).
    pub fn new(
        repository: Arc<dyn VerificationCodeRepository>,
        mail: Arc<dyn MailTransport>,
        sms: Arc<dyn SmsTransport>,
        captchas: Arc<CaptchaCache>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            repository,
            mail,
            sms,
            captchas,
            clock,
            generator: CaptchaGenerator::new(config.captcha_length),
            config,
        }
    }

    /// Generate a random 6-digit code
    pub fn generate_code() -> String {
        VerificationCode::generate_code()
    }

    pub fn captcha_cache(&self) -> &Arc<CaptchaCache> {
        &self.captchas
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a captcha and remember its answer
    pub fn generate_captcha(&self) -> CaptchaChallenge {
        let (text, svg) = self.generator.generate();
        let captcha_id = Uuid::new_v4().to_string();
        let expires_at = self.clock.now() + self.config.captcha_ttl();

        self.captchas
            .insert(captcha_id.clone(), CaptchaEntry::new(&text, expires_at));

        tracing::debug!(
            captcha_id = %captcha_id,
            event = "captcha_generated",
            "Generated captcha"
        );

        CaptchaChallenge {
            captcha_id,
            captcha_image: svg,
        }
    }

    /// Check a captcha answer (case-insensitive); a correct answer is consumed
    pub fn verify_captcha(&self, captcha_id: &str, submitted_code: &str) -> bool {
        let valid = self.captchas.verify(captcha_id, submitted_code);
        tracing::debug!(
            captcha_id = captcha_id,
            valid = valid,
            event = "captcha_verified",
            "Captcha verification attempted"
        );
        valid
    }

    /// Send a verification code to an email address
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - Code sent, or the cooldown wait hint
    /// * `Err(DomainError)` - `VerificationError::SendFailed` on any lookup,
    ///   persistence or mail failure
    pub async fn send_email_code(
        &self,
        email: &str,
        purpose: VerificationPurpose,
    ) -> DomainResult<SendCodeResult> {
        self.send_code(email, VerificationType::Email, purpose).await
    }

    /// Send a verification code to a phone number
    ///
    /// Same contract as [`send_email_code`](Self::send_email_code).
    pub async fn send_sms_code(
        &self,
        phone: &str,
        purpose: VerificationPurpose,
    ) -> DomainResult<SendCodeResult> {
        self.send_code(phone, VerificationType::Sms, purpose).await
    }

    async fn send_code(
        &self,
        target: &str,
        channel: VerificationType,
        purpose: VerificationPurpose,
    ) -> DomainResult<SendCodeResult> {
        let masked = mask_target(target, channel);
        let now = self.clock.now();

        // Resend cooldown against the latest active code for this key
        let latest = self
            .repository
            .find_latest(target, channel, purpose, now)
            .await
            .map_err(|e| send_failed(&masked, channel, "lookup", &e.to_string()))?;

        if let Some(existing) = latest {
            let elapsed = existing.seconds_since_created(now);
            if elapsed < self.config.resend_cooldown_seconds {
                let remaining = self.config.resend_cooldown_seconds - elapsed;
                tracing::info!(
                    recipient = %masked,
                    channel = %channel,
                    purpose = %purpose,
                    retry_after = remaining,
                    event = "verification_code_cooldown",
                    "Verification code requested during cooldown"
                );
                return Ok(SendCodeResult::cooling_down(remaining));
            }
        }

        let record = VerificationCode::new(target, channel, purpose, now, self.config.code_ttl());
        let record = self
            .repository
            .create(record)
            .await
            .map_err(|e| send_failed(&masked, channel, "persist", &e.to_string()))?;

        self.dispatch(&record)
            .await
            .map_err(|e| send_failed(&masked, channel, "dispatch", &e))?;

        tracing::info!(
            recipient = %masked,
            channel = %channel,
            purpose = %purpose,
            code_id = %record.id,
            event = "verification_code_sent",
            "Verification code sent"
        );

        Ok(SendCodeResult::sent(match channel {
            VerificationType::Email => EMAIL_SENT_MESSAGE,
            VerificationType::Sms => SMS_SENT_MESSAGE,
        }))
    }

    async fn dispatch(&self, record: &VerificationCode) -> Result<(), String> {
        match record.code_type {
            VerificationType::Email => {
                let brand = &self.config.brand_name;
                let message = MailMessage {
                    from: self.config.mail_from.clone(),
                    to: record.target.clone(),
                    subject: template::email_subject(brand, record.purpose),
                    html: template::email_html(
                        brand,
                        &record.code,
                        self.config.code_expiration_minutes,
                    ),
                };
                self.mail.send(&message).await
            }
            VerificationType::Sms => {
                let message_id = self.sms.send_code(&record.target, &record.code).await?;
                tracing::debug!(
                    code_id = %record.id,
                    message_id = %message_id,
                    "SMS provider accepted verification code"
                );
                Ok(())
            }
        }
    }

    /// Verify a submitted code
    ///
    /// Checks run in order: an active code must exist, the code must match
    /// (the record stays usable on mismatch), the purpose must match. A
    /// successful check marks the code used.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyCodeResult)` - Outcome; negative outcomes are not errors
    /// * `Err(DomainError::Internal)` - The store failed
    pub async fn verify_code(&self, command: VerifyCodeCommand) -> DomainResult<VerifyCodeResult> {
        let masked = mask_target(&command.target, command.code_type);
        let now = self.clock.now();

        let latest = self
            .repository
            .find_latest(&command.target, command.code_type, command.purpose, now)
            .await
            .map_err(|e| store_failed(&masked, "lookup", e))?;

        let Some(mut record) = latest else {
            tracing::info!(
                recipient = %masked,
                channel = %command.code_type,
                purpose = %command.purpose,
                event = "verification_code_not_found",
                "No active verification code"
            );
            return Ok(VerifyCodeResult::rejected(VerifyCodeResult::NOT_FOUND));
        };

        if !constant_time_eq(record.code.as_bytes(), command.code.as_bytes()) {
            tracing::warn!(
                recipient = %masked,
                code_id = %record.id,
                event = "verification_code_incorrect",
                "Incorrect verification code submitted"
            );
            return Ok(VerifyCodeResult::rejected(VerifyCodeResult::INCORRECT));
        }

        // Purpose is part of the lookup key; this only trips on a store that ignores it
        if record.purpose != command.purpose {
            tracing::warn!(
                recipient = %masked,
                code_id = %record.id,
                expected = %command.purpose,
                actual = %record.purpose,
                event = "verification_code_purpose_mismatch",
                "Verification code purpose mismatch"
            );
            return Ok(VerifyCodeResult::rejected(VerifyCodeResult::PURPOSE_MISMATCH));
        }

        record.mark_used(now);
        let record = self
            .repository
            .save(record)
            .await
            .map_err(|e| store_failed(&masked, "save", e))?;

        tracing::info!(
            recipient = %masked,
            code_id = %record.id,
            purpose = %record.purpose,
            event = "verification_code_verified",
            "Verification code verified"
        );

        Ok(VerifyCodeResult::accepted())
    }
}

fn mask_target(target: &str, channel: VerificationType) -> String {
    match channel {
        VerificationType::Email => mask_email(target),
        VerificationType::Sms => mask_phone_number(target),
    }
}

fn send_failed(masked: &str, channel: VerificationType, stage: &str, cause: &str) -> DomainError {
    tracing::error!(
        recipient = %masked,
        channel = %channel,
        stage = stage,
        error = cause,
        event = "verification_send_failed",
        "Failed to send verification code"
    );
    VerificationError::SendFailed.into()
}

fn store_failed(masked: &str, stage: &str, error: DomainError) -> DomainError {
    tracing::error!(
        recipient = %masked,
        stage = stage,
        error = %error,
        event = "verification_store_failed",
        "Verification code store failed"
    );
    match error {
        DomainError::Internal { .. } => error,
        other => DomainError::internal(other.to_string()),
    }
}

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use sg_core::domain::entities::captcha::CaptchaChallenge;
use sg_core::domain::entities::verification_code::{VerificationPurpose, VerificationType};
use sg_core::errors::VerificationError;
use sg_core::services::{SendCodeResult, VerifyCodeCommand, VerifyCodeResult};
use sg_shared::utils::{is_valid_chinese_mobile, is_valid_email};

pub const CAPTCHA_VALID_MESSAGE: &str = "Verification successful";
pub const CAPTCHA_INVALID_MESSAGE: &str = "Captcha is incorrect or expired";

fn validate_mobile(phone: &str) -> Result<(), ValidationError> {
    if is_valid_chinese_mobile(phone) {
        Ok(())
    } else {
        let mut error = ValidationError::new("phone");
        error.message = Some("Please provide a valid mobile phone number".into());
        Err(error)
    }
}

fn ensure_purpose(
    purpose: VerificationPurpose,
    channel: VerificationType,
) -> Result<(), VerificationError> {
    if purpose.allowed_for(channel) {
        Ok(())
    } else {
        Err(VerificationError::InvalidPurpose {
            purpose: purpose.to_string(),
            channel: channel.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendEmailCodeRequest {
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,

    /// One of register, login, reset_password, change_email
    pub purpose: VerificationPurpose,
}

impl SendEmailCodeRequest {
    pub fn ensure_purpose(&self) -> Result<(), VerificationError> {
        ensure_purpose(self.purpose, VerificationType::Email)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendSmsCodeRequest {
    /// Mainland China mobile number, e.g. "13800138000"
    #[validate(custom(function = "validate_mobile"))]
    pub phone: String,

    /// One of register, login, reset_password, change_phone
    pub purpose: VerificationPurpose,
}

impl SendSmsCodeRequest {
    pub fn ensure_purpose(&self) -> Result<(), VerificationError> {
        ensure_purpose(self.purpose, VerificationType::Sms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub message: String,
    /// Seconds until a new code may be requested, set during cooldown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<i64>,
}

impl From<SendCodeResult> for SendCodeResponse {
    fn from(result: SendCodeResult) -> Self {
        Self {
            message: result.message,
            retry_after: result.retry_after,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(length(min = 1, message = "Target must not be empty"))]
    pub target: String,

    #[validate(length(min = 1, message = "Code must not be empty"))]
    pub code: String,

    #[serde(rename = "type")]
    pub code_type: VerificationType,

    pub purpose: VerificationPurpose,
}

impl VerifyCodeRequest {
    /// The target must look like an address of the declared channel
    pub fn ensure_target(&self) -> Result<(), VerificationError> {
        let valid = match self.code_type {
            VerificationType::Email => is_valid_email(&self.target),
            VerificationType::Sms => is_valid_chinese_mobile(&self.target),
        };
        if valid {
            Ok(())
        } else {
            Err(VerificationError::InvalidTarget {
                target: self.target.clone(),
                channel: self.code_type.to_string(),
            })
        }
    }
}

impl From<VerifyCodeRequest> for VerifyCodeCommand {
    fn from(request: VerifyCodeRequest) -> Self {
        Self {
            target: request.target,
            code: request.code,
            code_type: request.code_type,
            purpose: request.purpose,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub valid: bool,
    pub message: String,
}

impl From<VerifyCodeResult> for VerifyCodeResponse {
    fn from(result: VerifyCodeResult) -> Self {
        Self {
            valid: result.valid,
            message: result.message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptchaResponse {
    pub captcha_id: String,
    /// SVG markup
    pub captcha: String,
}

impl From<CaptchaChallenge> for CaptchaResponse {
    fn from(challenge: CaptchaChallenge) -> Self {
        Self {
            captcha_id: challenge.captcha_id,
            captcha: challenge.captcha_image,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCaptchaRequest {
    #[validate(length(min = 1, message = "Captcha id must not be empty"))]
    pub captcha_id: String,

    #[validate(length(min = 1, message = "Captcha code must not be empty"))]
    pub captcha_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCaptchaResponse {
    pub valid: bool,
    pub message: String,
}

impl VerifyCaptchaResponse {
    pub fn new(valid: bool) -> Self {
        Self {
            valid,
            message: if valid {
                CAPTCHA_VALID_MESSAGE
            } else {
                CAPTCHA_INVALID_MESSAGE
            }
            .to_string(),
        }
    }
}

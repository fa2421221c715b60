//! Types for verification service requests and results

use serde::{Deserialize, Serialize};

use crate::domain::entities::verification_code::{VerificationPurpose, VerificationType};

/// Result of a send request
///
/// A request inside the resend cooldown is still a success; it carries the
/// wait hint in `message` and the remaining seconds in `retry_after`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendCodeResult {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<i64>,
}

impl SendCodeResult {
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retry_after: None,
        }
    }

    pub fn cooling_down(remaining_seconds: i64) -> Self {
        Self {
            message: format!(
                "Please wait {} seconds before requesting a new code",
                remaining_seconds
            ),
            retry_after: Some(remaining_seconds),
        }
    }

    /// Whether a code was actually issued
    pub fn is_sent(&self) -> bool {
        self.retry_after.is_none()
    }
}

/// Input of a code verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCodeCommand {
    pub target: String,
    pub code: String,
    pub code_type: VerificationType,
    pub purpose: VerificationPurpose,
}

/// Result of verifying a code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyCodeResult {
    /// Whether the verification was successful
    pub valid: bool,
    pub message: String,
}

impl VerifyCodeResult {
    pub const NOT_FOUND: &'static str = "Verification code not found or expired";
    pub const INCORRECT: &'static str = "Incorrect code";
    pub const PURPOSE_MISMATCH: &'static str = "Verification code purpose mismatch";
    pub const SUCCESS: &'static str = "Code verified";

    pub(crate) fn rejected(message: &str) -> Self {
        Self {
            valid: false,
            message: message.to_string(),
        }
    }

    pub(crate) fn accepted() -> Self {
        Self {
            valid: true,
            message: Self::SUCCESS.to_string(),
        }
    }
}

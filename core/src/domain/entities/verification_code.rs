//! Verification code entity for email and SMS based verification.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (15 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 15;

/// Delivery channel of a verification code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationType {
    Email,
    Sms,
}

impl VerificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationType::Email => "email",
            VerificationType::Sms => "sms",
        }
    }
}

impl fmt::Display for VerificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(VerificationType::Email),
            "sms" => Ok(VerificationType::Sms),
            _ => Err(format!("Invalid verification type: {}", s)),
        }
    }
}

/// Business flow a code was issued for
///
/// A code only verifies for the purpose it was issued with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPurpose {
    Register,
    Login,
    ResetPassword,
    ChangeEmail,
    ChangePhone,
}

impl VerificationPurpose {
    pub const ALL: [VerificationPurpose; 5] = [
        VerificationPurpose::Register,
        VerificationPurpose::Login,
        VerificationPurpose::ResetPassword,
        VerificationPurpose::ChangeEmail,
        VerificationPurpose::ChangePhone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationPurpose::Register => "register",
            VerificationPurpose::Login => "login",
            VerificationPurpose::ResetPassword => "reset_password",
            VerificationPurpose::ChangeEmail => "change_email",
            VerificationPurpose::ChangePhone => "change_phone",
        }
    }

    /// Whether codes for this purpose may be sent over the given channel
    ///
    /// Email change codes only go to email, phone change codes only to SMS.
    pub fn allowed_for(&self, channel: VerificationType) -> bool {
        match (self, channel) {
            (VerificationPurpose::ChangeEmail, VerificationType::Sms) => false,
            (VerificationPurpose::ChangePhone, VerificationType::Email) => false,
            _ => true,
        }
    }
}

impl fmt::Display for VerificationPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VerificationPurpose::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Invalid verification purpose: {}", s))
    }
}

/// A persisted verification code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the verification code
    pub id: Uuid,

    /// The 6-digit verification code
    pub code: String,

    /// Email address or phone number the code was sent to
    pub target: String,

    /// Delivery channel
    pub code_type: VerificationType,

    /// Flow the code is bound to
    pub purpose: VerificationPurpose,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully used
    pub is_used: bool,

    /// Timestamp of the successful verification
    pub used_at: Option<DateTime<Utc>>,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Creates a new unused code with a random 6-digit value
    ///
    /// # Arguments
    ///
    /// * `target` - Email address or phone number
    /// * `code_type` - Delivery channel
    /// * `purpose` - Flow the code is bound to
    /// * `now` - Creation time
    /// * `ttl` - Lifetime of the code
    pub fn new(
        target: impl Into<String>,
        code_type: VerificationType,
        purpose: VerificationPurpose,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: Self::generate_code(),
            target: target.into(),
            code_type,
            purpose,
            expires_at: now + ttl,
            is_used: false,
            used_at: None,
            created_at: now,
        }
    }

    /// Generates a random 6-digit code, uniform over [100000, 999999]
    pub fn generate_code() -> String {
        let code: u32 = rand::thread_rng().gen_range(100_000..=999_999);
        code.to_string()
    }

    /// Checks if the code has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// An active code is unused and unexpired
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && !self.is_expired_at(now)
    }

    /// Whole seconds elapsed since creation, never negative
    pub fn seconds_since_created(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_seconds().max(0)
    }

    /// Marks the code as used
    pub fn mark_used(&mut self, now: DateTime<Utc>) {
        self.is_used = true;
        self.used_at = Some(now);
    }
}

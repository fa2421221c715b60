//! Domain entities representing core business objects.

pub mod captcha;
pub mod verification_code;

// Re-export commonly used types
pub use captcha::{CaptchaChallenge, CaptchaEntry};
pub use verification_code::{
    VerificationCode, VerificationPurpose, VerificationType, CODE_LENGTH,
    DEFAULT_EXPIRATION_MINUTES,
};

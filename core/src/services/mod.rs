//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    CaptchaCache, Clock, MailMessage, MailTransport, ManualClock, SendCodeResult, SmsTransport,
    SystemClock, VerificationService, VerificationServiceConfig, VerifyCodeCommand,
    VerifyCodeResult,
};

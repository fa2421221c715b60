//! Verification service module for email and SMS verification codes
//!
//! This module provides the complete verification workflow:
//! - 6-digit code generation, persistence and delivery by email or SMS
//! - Resend cooldown per target, channel and purpose
//! - Single-use, purpose-bound code verification
//! - Graphical captchas held in a swept in-memory cache

pub mod captcha;
mod clock;
mod config;
mod service;
pub mod template;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use captcha::{CaptchaCache, CaptchaGenerator};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::{MailMessage, MailTransport, SmsTransport};
pub use types::{SendCodeResult, VerifyCodeCommand, VerifyCodeResult};

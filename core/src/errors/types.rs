//! Verification-specific error types
//!
//! Only failures are modelled here. Negative verification outcomes (wrong,
//! expired or unknown codes) are ordinary results, not errors.

use thiserror::Error;

/// Verification-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// Lookup, persistence or dispatch failed while sending a code.
    /// The cause is logged and never carried to the caller.
    #[error("Failed to send verification code, please try again later")]
    SendFailed,

    #[error("Purpose {purpose} is not allowed for {channel} verification codes")]
    InvalidPurpose { purpose: String, channel: String },

    #[error("Invalid {channel} target: {target}")]
    InvalidTarget { target: String, channel: String },
}

//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the ShineGold verification
//! backend. It provides concrete implementations of the collaborators the
//! verification engine is written against.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL verification code store using SQLx
//! - **Email**: SMTP transport (lettre) and a logging transport for development
//! - **SMS**: Logging transport standing in for a carrier integration
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use sg_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email module - Mail transports
pub mod email;

/// SMS module - SMS transports
pub mod sms;

/// Configuration types consumed by the infrastructure factories
pub mod config {
    pub use sg_shared::config::{DatabaseConfig, EmailConfig, EmailTransportKind, SmsConfig};
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Mail transport error
    #[error("Mail error: {0}")]
    Mail(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

//! Database module - MySQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management and schema setup
//! - The MySQL verification code repository

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use sg_core::repositories::{InMemoryVerificationCodeRepository, VerificationCodeRepository};

use crate::config::DatabaseConfig;
use crate::InfrastructureError;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::MySqlVerificationCodeRepository;

/// Create the verification code store
///
/// Connects to MySQL and ensures the schema when a database is configured,
/// otherwise falls back to the in-process store.
pub async fn create_repository(
    config: Option<&DatabaseConfig>,
) -> Result<Arc<dyn VerificationCodeRepository>, InfrastructureError> {
    match config {
        Some(config) => {
            let pool = DatabasePool::new(config.clone()).await?;
            pool.ensure_schema().await?;
            Ok(Arc::new(MySqlVerificationCodeRepository::new(
                pool.get_pool().clone(),
            )))
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set, verification codes are kept in memory and lost on restart"
            );
            Ok(Arc::new(InMemoryVerificationCodeRepository::new()))
        }
    }
}

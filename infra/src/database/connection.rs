//! MySQL pool for the verification code store
//!
//! The pool is created once at boot; `create_repository` then bootstraps the
//! `verification_codes` table before handing the pool to the repository.

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    Executor, MySqlPool,
};
use std::str::FromStr;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::InfrastructureError;

/// Schema of the verification code table
pub const VERIFICATION_CODES_SCHEMA: &str =
    include_str!("../../migrations/001_create_verification_codes.sql");

/// Connection pool backing `MySqlVerificationCodeRepository`
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connect using the pool limits from `config`
    ///
    /// Fails fast with `InfrastructureError::Config` when the URL does not
    /// parse, before any network access.
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        tracing::info!(
            max_connections = config.max_connections,
            connect_timeout = config.connect_timeout,
            event = "database_connecting",
            "Connecting verification code store"
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, event = "database_connect_failed", "Failed to connect verification code store");
                InfrastructureError::Database(e)
            })?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Create `verification_codes` and its lookup index when missing
    pub async fn ensure_schema(&self) -> Result<(), InfrastructureError> {
        self.pool
            .execute(VERIFICATION_CODES_SCHEMA)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, event = "database_schema_failed", "Failed to create verification_codes table");
                InfrastructureError::Database(e)
            })?;

        tracing::info!(event = "database_schema_ready", "verification_codes table ready");
        Ok(())
    }

    /// Round-trip a trivial query
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let value: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(InfrastructureError::Database)?;
        Ok(value == 1)
    }
}

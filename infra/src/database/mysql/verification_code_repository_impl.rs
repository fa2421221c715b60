//! MySQL implementation of the VerificationCodeRepository trait.
//!
//! Codes live in the `verification_codes` table. Lookups use the
//! `(target, code_type, purpose, is_used, created_at)` index and always take
//! the newest matching row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sg_core::domain::entities::verification_code::{
    VerificationCode, VerificationPurpose, VerificationType,
};
use sg_core::errors::DomainError;
use sg_core::repositories::VerificationCodeRepository;

const SELECT_COLUMNS: &str =
    "id, code, target, code_type, purpose, expires_at, is_used, used_at, created_at";

/// MySQL implementation of VerificationCodeRepository
pub struct MySqlVerificationCodeRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlVerificationCodeRepository {
    /// Create a new MySQL verification code repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to VerificationCode entity
    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<VerificationCode, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| column_error("id", e))?;
        let code_type: String = row
            .try_get("code_type")
            .map_err(|e| column_error("code_type", e))?;
        let purpose: String = row
            .try_get("purpose")
            .map_err(|e| column_error("purpose", e))?;

        Ok(VerificationCode {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid verification code UUID: {}", e),
            })?,
            code: row.try_get("code").map_err(|e| column_error("code", e))?,
            target: row.try_get("target").map_err(|e| column_error("target", e))?,
            code_type: parse_code_type(&code_type)?,
            purpose: parse_purpose(&purpose)?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| column_error("expires_at", e))?,
            is_used: row
                .try_get("is_used")
                .map_err(|e| column_error("is_used", e))?,
            used_at: row
                .try_get::<Option<DateTime<Utc>>, _>("used_at")
                .map_err(|e| column_error("used_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
        })
    }
}

fn column_error(column: &str, error: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, error),
    }
}

pub(crate) fn parse_code_type(value: &str) -> Result<VerificationType, DomainError> {
    value
        .parse()
        .map_err(|message: String| DomainError::Internal { message })
}

pub(crate) fn parse_purpose(value: &str) -> Result<VerificationPurpose, DomainError> {
    value
        .parse()
        .map_err(|message: String| DomainError::Internal { message })
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        let query = r#"
            INSERT INTO verification_codes (
                id, code, target, code_type, purpose,
                expires_at, is_used, used_at, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(code.id.to_string())
            .bind(&code.code)
            .bind(&code.target)
            .bind(code.code_type.as_str())
            .bind(code.purpose.as_str())
            .bind(code.expires_at)
            .bind(code.is_used)
            .bind(code.used_at)
            .bind(code.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to save verification code: {}", e),
            })?;

        Ok(code)
    }

    async fn find_latest(
        &self,
        target: &str,
        code_type: VerificationType,
        purpose: VerificationPurpose,
        as_of: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM verification_codes
            WHERE target = ? AND code_type = ? AND purpose = ?
              AND is_used = FALSE AND expires_at > ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
            SELECT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(target)
            .bind(code_type.as_str())
            .bind(purpose.as_str())
            .bind(as_of)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find verification code: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_code(&row)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        let query = r#"
            UPDATE verification_codes
            SET is_used = ?, used_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(code.is_used)
            .bind(code.used_at)
            .bind(code.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update verification code: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("verification code {}", code.id),
            });
        }

        Ok(code)
    }
}

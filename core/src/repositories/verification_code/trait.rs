//! Verification code repository trait defining the interface for code persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::verification_code::{
    VerificationCode, VerificationPurpose, VerificationType,
};
use crate::errors::DomainError;

/// Repository trait for VerificationCode persistence operations
///
/// Records are never deleted through this interface. Superseded codes stay
/// stored and simply stop being returned by `find_latest` once a newer code
/// exists, they are used, or they expire.
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Persist a newly issued code
    ///
    /// # Returns
    /// * `Ok(VerificationCode)` - The stored record
    /// * `Err(DomainError)` - Storage failed
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError>;

    /// Find the most recently created active code for a key
    ///
    /// Matches on equality of `target`, `code_type` and `purpose`, keeps only
    /// records that are unused with `expires_at > as_of`, orders by
    /// `created_at` descending and returns the first.
    ///
    /// # Returns
    /// * `Ok(Some(VerificationCode))` - Latest active code
    /// * `Ok(None)` - No active code for the key
    /// * `Err(DomainError)` - Storage failed
    async fn find_latest(
        &self,
        target: &str,
        code_type: VerificationType,
        purpose: VerificationPurpose,
        as_of: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError>;

    /// Persist changes to an existing code (used flag and timestamp)
    ///
    /// # Returns
    /// * `Ok(VerificationCode)` - The updated record
    /// * `Err(DomainError::NotFound)` - No record with this id
    async fn save(&self, code: VerificationCode) -> Result<VerificationCode, DomainError>;
}

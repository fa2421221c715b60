//! In-process implementation of VerificationCodeRepository
//!
//! Used when no database is configured and by tests. Records live for the
//! lifetime of the process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_code::{
    VerificationCode, VerificationPurpose, VerificationType,
};
use crate::errors::DomainError;

use super::r#trait::VerificationCodeRepository;

/// In-memory verification code repository
#[derive(Clone, Default)]
pub struct InMemoryVerificationCodeRepository {
    // Insertion order breaks ties between equal creation timestamps.
    codes: Arc<RwLock<Vec<VerificationCode>>>,
}

impl InMemoryVerificationCodeRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, active or not
    pub async fn len(&self) -> usize {
        self.codes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.codes.read().await.is_empty()
    }

    /// Fetch a record by id regardless of its state
    pub async fn get(&self, id: Uuid) -> Option<VerificationCode> {
        self.codes.read().await.iter().find(|c| c.id == id).cloned()
    }

    /// All records for a target, oldest first
    pub async fn find_by_target(&self, target: &str) -> Vec<VerificationCode> {
        self.codes
            .read()
            .await
            .iter()
            .filter(|c| c.target == target)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl VerificationCodeRepository for InMemoryVerificationCodeRepository {
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        let mut codes = self.codes.write().await;

        if codes.iter().any(|c| c.id == code.id) {
            return Err(DomainError::Validation {
                message: format!("Verification code {} already exists", code.id),
            });
        }

        codes.push(code.clone());
        Ok(code)
    }

    async fn find_latest(
        &self,
        target: &str,
        code_type: VerificationType,
        purpose: VerificationPurpose,
        as_of: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let codes = self.codes.read().await;
        // max_by_key keeps the last maximum, i.e. the latest insert on ties
        Ok(codes
            .iter()
            .filter(|c| {
                c.target == target
                    && c.code_type == code_type
                    && c.purpose == purpose
                    && c.is_active_at(as_of)
            })
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn save(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        let mut codes = self.codes.write().await;

        match codes.iter_mut().find(|c| c.id == code.id) {
            Some(existing) => {
                *existing = code.clone();
                Ok(code)
            }
            None => Err(DomainError::NotFound {
                resource: format!("verification code {}", code.id),
            }),
        }
    }
}

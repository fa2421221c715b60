//! Unit tests for the in-memory verification code repository

use chrono::{Duration, Utc};

use crate::domain::entities::verification_code::{
    VerificationCode, VerificationPurpose, VerificationType,
};
use crate::errors::DomainError;
use crate::repositories::verification_code::{
    InMemoryVerificationCodeRepository, VerificationCodeRepository,
};

const TARGET: &str = "user@example.com";

fn email_code(created: chrono::DateTime<Utc>, purpose: VerificationPurpose) -> VerificationCode {
    VerificationCode::new(
        TARGET,
        VerificationType::Email,
        purpose,
        created,
        Duration::minutes(15),
    )
}

#[tokio::test]
async fn test_find_latest_prefers_newest() {
    let repo = InMemoryVerificationCodeRepository::new();
    let now = Utc::now();

    let older = repo
        .create(email_code(now - Duration::minutes(5), VerificationPurpose::Register))
        .await
        .unwrap();
    let newer = repo
        .create(email_code(now - Duration::minutes(1), VerificationPurpose::Register))
        .await
        .unwrap();

    let found = repo
        .find_latest(TARGET, VerificationType::Email, VerificationPurpose::Register, now)
        .await
        .unwrap()
        .expect("active code should be found");

    assert_eq!(found.id, newer.id);
    assert_ne!(found.id, older.id);
    assert_eq!(repo.len().await, 2);
}

#[tokio::test]
async fn test_find_latest_ties_resolve_to_last_insert() {
    let repo = InMemoryVerificationCodeRepository::new();
    let now = Utc::now();

    repo.create(email_code(now, VerificationPurpose::Login)).await.unwrap();
    let second = repo.create(email_code(now, VerificationPurpose::Login)).await.unwrap();

    let found = repo
        .find_latest(TARGET, VerificationType::Email, VerificationPurpose::Login, now)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, second.id);
}

#[tokio::test]
async fn test_find_latest_filters_key_and_state() {
    let repo = InMemoryVerificationCodeRepository::new();
    let now = Utc::now();

    // Wrong purpose
    repo.create(email_code(now, VerificationPurpose::Login)).await.unwrap();
    // Expired
    repo.create(email_code(now - Duration::minutes(20), VerificationPurpose::Register))
        .await
        .unwrap();
    // Used
    let mut used = email_code(now, VerificationPurpose::Register);
    used.mark_used(now);
    repo.create(used).await.unwrap();
    // Wrong channel
    repo.create(VerificationCode::new(
        TARGET,
        VerificationType::Sms,
        VerificationPurpose::Register,
        now,
        Duration::minutes(15),
    ))
    .await
    .unwrap();

    let found = repo
        .find_latest(TARGET, VerificationType::Email, VerificationPurpose::Register, now)
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_save_updates_existing_record() {
    let repo = InMemoryVerificationCodeRepository::new();
    let now = Utc::now();

    let mut code = repo
        .create(email_code(now, VerificationPurpose::Register))
        .await
        .unwrap();
    code.mark_used(now);
    repo.save(code.clone()).await.unwrap();

    let stored = repo.get(code.id).await.unwrap();
    assert!(stored.is_used);
    assert_eq!(stored.used_at, Some(now));
}

#[tokio::test]
async fn test_save_unknown_record_fails() {
    let repo = InMemoryVerificationCodeRepository::new();
    let code = email_code(Utc::now(), VerificationPurpose::Register);

    let result = repo.save(code).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_create_duplicate_id_fails() {
    let repo = InMemoryVerificationCodeRepository::new();
    let code = email_code(Utc::now(), VerificationPurpose::Register);

    repo.create(code.clone()).await.unwrap();
    let result = repo.create(code).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

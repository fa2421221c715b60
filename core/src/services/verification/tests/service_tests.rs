//! Unit tests for verification service

use chrono::Duration;
use std::sync::atomic::Ordering;

use crate::domain::entities::verification_code::{
    VerificationCode, VerificationPurpose, VerificationType,
};
use crate::errors::{DomainError, VerificationError};
use crate::repositories::VerificationCodeRepository;
use crate::services::verification::{
    Clock, VerificationService, VerifyCodeCommand, VerifyCodeResult,
};

use super::mocks::TestHarness;

const EMAIL: &str = "user@example.com";
const PHONE: &str = "13812345678";

fn verify_email(code: &str, purpose: VerificationPurpose) -> VerifyCodeCommand {
    VerifyCodeCommand {
        target: EMAIL.to_string(),
        code: code.to_string(),
        code_type: VerificationType::Email,
        purpose,
    }
}

fn assert_send_failed(error: DomainError) {
    match error {
        DomainError::Verification(VerificationError::SendFailed) => {}
        other => panic!("Expected SendFailed, got {:?}", other),
    }
}

#[test]
fn test_generate_code_format() {
    let pattern = regex::Regex::new(r"^\d{6}$").unwrap();
    for _ in 0..500 {
        assert!(pattern.is_match(&VerificationService::generate_code()));
    }
}

#[test]
fn test_verify_messages_name_the_outcome() {
    let lower = |m: &str| m.to_lowercase();
    assert!(lower(VerifyCodeResult::NOT_FOUND).contains("code not found or expired"));
    assert!(lower(VerifyCodeResult::INCORRECT).contains("incorrect code"));
    assert!(lower(VerifyCodeResult::PURPOSE_MISMATCH).contains("purpose mismatch"));
    assert!(lower(VerifyCodeResult::SUCCESS).contains("verified"));
}

#[tokio::test]
async fn test_send_email_code_success() {
    let h = TestHarness::new();

    let result = h
        .service
        .send_email_code(EMAIL, VerificationPurpose::Register)
        .await
        .unwrap();

    assert_eq!(result.message, "Verification code sent to your email");
    assert!(result.is_sent());

    let records = h.records(EMAIL).await;
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.code_type, VerificationType::Email);
    assert_eq!(record.purpose, VerificationPurpose::Register);
    assert_eq!(record.expires_at, h.clock.now() + Duration::minutes(15));
    assert!(!record.is_used);

    let sent = h.mail.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, EMAIL);
    assert_eq!(sent[0].subject, "ShineGold - Registration code");
    assert!(sent[0].html.contains(&record.code));
    assert!(sent[0].from.contains("ShineGold"));
    assert!(h.sms.sent().is_empty());
}

#[tokio::test]
async fn test_send_sms_code_success() {
    let h = TestHarness::new();

    let result = h
        .service
        .send_sms_code(PHONE, VerificationPurpose::Login)
        .await
        .unwrap();

    assert_eq!(result.message, "Verification code sent to your phone");

    let records = h.records(PHONE).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].code_type, VerificationType::Sms);
    assert_eq!(h.sms.sent(), vec![(PHONE.to_string(), records[0].code.clone())]);
    assert!(h.mail.sent().is_empty());
}

#[tokio::test]
async fn test_resend_within_cooldown_is_suppressed() {
    let h = TestHarness::new();

    h.service
        .send_email_code(EMAIL, VerificationPurpose::Register)
        .await
        .unwrap();
    h.clock.advance(Duration::seconds(20));

    let second = h
        .service
        .send_email_code(EMAIL, VerificationPurpose::Register)
        .await
        .unwrap();

    assert!(!second.is_sent());
    assert_eq!(second.retry_after, Some(40));
    assert!(second.message.contains("wait 40 seconds"));
    assert_eq!(h.records(EMAIL).await.len(), 1);
    assert_eq!(h.mail.sent().len(), 1);
}

#[tokio::test]
async fn test_sms_resend_within_cooldown_is_suppressed() {
    let h = TestHarness::new();

    h.service
        .send_sms_code(PHONE, VerificationPurpose::Register)
        .await
        .unwrap();
    let second = h
        .service
        .send_sms_code(PHONE, VerificationPurpose::Register)
        .await
        .unwrap();

    assert_eq!(second.retry_after, Some(60));
    assert_eq!(h.records(PHONE).await.len(), 1);
    assert_eq!(h.sms.sent().len(), 1);
}

#[tokio::test]
async fn test_resend_after_cooldown_issues_new_code() {
    let h = TestHarness::new();

    h.service
        .send_email_code(EMAIL, VerificationPurpose::Register)
        .await
        .unwrap();
    h.clock.advance(Duration::seconds(60));

    let second = h
        .service
        .send_email_code(EMAIL, VerificationPurpose::Register)
        .await
        .unwrap();

    assert!(second.is_sent());
    let records = h.records(EMAIL).await;
    assert_eq!(records.len(), 2);
    assert_eq!(h.mail.sent().len(), 2);

    // Only the newest code verifies
    let older = records[0].code.clone();
    let newer = records[1].code.clone();
    if older != newer {
        let result = h
            .service
            .verify_code(verify_email(&older, VerificationPurpose::Register))
            .await
            .unwrap();
        assert_eq!(result.message, VerifyCodeResult::INCORRECT);
    }
    let result = h
        .service
        .verify_code(verify_email(&newer, VerificationPurpose::Register))
        .await
        .unwrap();
    assert!(result.valid);
}

#[tokio::test]
async fn test_cooldown_is_scoped_to_purpose_and_channel() {
    let h = TestHarness::new();

    h.service
        .send_email_code(EMAIL, VerificationPurpose::Register)
        .await
        .unwrap();
    let other_purpose = h
        .service
        .send_email_code(EMAIL, VerificationPurpose::ResetPassword)
        .await
        .unwrap();

    assert!(other_purpose.is_sent());
    assert_eq!(h.records(EMAIL).await.len(), 2);
}

#[tokio::test]
async fn test_used_code_does_not_hold_cooldown() {
    let h = TestHarness::new();

    h.service
        .send_email_code(EMAIL, VerificationPurpose::Login)
        .await
        .unwrap();
    let code = h.records(EMAIL).await[0].code.clone();
    h.service
        .verify_code(verify_email(&code, VerificationPurpose::Login))
        .await
        .unwrap();

    let again = h
        .service
        .send_email_code(EMAIL, VerificationPurpose::Login)
        .await
        .unwrap();
    assert!(again.is_sent());
}

#[tokio::test]
async fn test_mail_failure_yields_generic_error() {
    let h = TestHarness::new();
    h.mail.fail();

    let error = h
        .service
        .send_email_code(EMAIL, VerificationPurpose::Register)
        .await
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "Failed to send verification code, please try again later"
    );
    assert!(!error.to_string().contains("SMTP"));
    assert_send_failed(error);
}

#[tokio::test]
async fn test_sms_failure_yields_generic_error() {
    let h = TestHarness::new();
    h.sms.fail();

    let error = h
        .service
        .send_sms_code(PHONE, VerificationPurpose::Register)
        .await
        .unwrap_err();
    assert_send_failed(error);
}

#[tokio::test]
async fn test_store_failures_yield_generic_error() {
    let h = TestHarness::new();

    h.repository.fail_find.store(true, Ordering::SeqCst);
    let error = h
        .service
        .send_email_code(EMAIL, VerificationPurpose::Register)
        .await
        .unwrap_err();
    assert_send_failed(error);
    assert!(h.mail.sent().is_empty());

    h.repository.fail_find.store(false, Ordering::SeqCst);
    h.repository.fail_create.store(true, Ordering::SeqCst);
    let error = h
        .service
        .send_email_code(EMAIL, VerificationPurpose::Register)
        .await
        .unwrap_err();
    assert_send_failed(error);
    assert!(h.mail.sent().is_empty());
}

#[tokio::test]
async fn test_verify_code_success_then_single_use() {
    let h = TestHarness::new();

    h.service
        .send_email_code(EMAIL, VerificationPurpose::Register)
        .await
        .unwrap();
    let code = h.records(EMAIL).await[0].code.clone();
    h.clock.advance(Duration::seconds(30));

    let first = h
        .service
        .verify_code(verify_email(&code, VerificationPurpose::Register))
        .await
        .unwrap();
    assert!(first.valid);
    assert_eq!(first.message, VerifyCodeResult::SUCCESS);

    let record = &h.records(EMAIL).await[0];
    assert!(record.is_used);
    assert_eq!(record.used_at, Some(h.clock.now()));

    let second = h
        .service
        .verify_code(verify_email(&code, VerificationPurpose::Register))
        .await
        .unwrap();
    assert!(!second.valid);
    assert_eq!(second.message, VerifyCodeResult::NOT_FOUND);
}

#[tokio::test]
async fn test_incorrect_code_keeps_record_usable() {
    let h = TestHarness::new();

    h.service
        .send_email_code(EMAIL, VerificationPurpose::Register)
        .await
        .unwrap();
    let before = h.records(EMAIL).await[0].clone();
    let wrong = if before.code == "123456" { "654321" } else { "123456" };

    let result = h
        .service
        .verify_code(verify_email(wrong, VerificationPurpose::Register))
        .await
        .unwrap();
    assert!(!result.valid);
    assert_eq!(result.message, VerifyCodeResult::INCORRECT);

    let after = h.records(EMAIL).await[0].clone();
    assert_eq!(after, before);

    let retry = h
        .service
        .verify_code(verify_email(&before.code, VerificationPurpose::Register))
        .await
        .unwrap();
    assert!(retry.valid);
}

#[tokio::test]
async fn test_expired_code_is_not_found() {
    let h = TestHarness::new();

    h.service
        .send_email_code(EMAIL, VerificationPurpose::Register)
        .await
        .unwrap();
    let code = h.records(EMAIL).await[0].code.clone();
    h.clock.advance(Duration::minutes(15));

    let result = h
        .service
        .verify_code(verify_email(&code, VerificationPurpose::Register))
        .await
        .unwrap();
    assert!(!result.valid);
    assert_eq!(result.message, VerifyCodeResult::NOT_FOUND);
    assert!(!h.records(EMAIL).await[0].is_used);
}

#[tokio::test]
async fn test_code_for_other_purpose_is_not_found() {
    let h = TestHarness::new();

    h.service
        .send_email_code(EMAIL, VerificationPurpose::Register)
        .await
        .unwrap();
    let code = h.records(EMAIL).await[0].code.clone();

    let result = h
        .service
        .verify_code(verify_email(&code, VerificationPurpose::Login))
        .await
        .unwrap();
    assert_eq!(result.message, VerifyCodeResult::NOT_FOUND);
}

#[tokio::test]
async fn test_purpose_mismatch_from_lenient_store() {
    let h = TestHarness::new();
    h.repository.ignore_purpose.store(true, Ordering::SeqCst);

    let record = VerificationCode::new(
        EMAIL,
        VerificationType::Email,
        VerificationPurpose::Register,
        h.clock.now(),
        Duration::minutes(15),
    );
    let code = record.code.clone();
    h.repository.create(record).await.unwrap();

    // Matching code but different purpose
    let result = h
        .service
        .verify_code(verify_email(&code, VerificationPurpose::Login))
        .await
        .unwrap();
    assert!(!result.valid);
    assert_eq!(result.message, VerifyCodeResult::PURPOSE_MISMATCH);

    // Wrong code takes precedence over the purpose mismatch
    let wrong = if code == "123456" { "654321" } else { "123456" };
    let result = h
        .service
        .verify_code(verify_email(wrong, VerificationPurpose::Login))
        .await
        .unwrap();
    assert_eq!(result.message, VerifyCodeResult::INCORRECT);
    assert!(!h.records(EMAIL).await[0].is_used);
}

#[tokio::test]
async fn test_verify_store_failure_is_internal() {
    let h = TestHarness::new();

    h.service
        .send_email_code(EMAIL, VerificationPurpose::Register)
        .await
        .unwrap();
    let code = h.records(EMAIL).await[0].code.clone();
    h.repository.fail_save.store(true, Ordering::SeqCst);

    let error = h
        .service
        .verify_code(verify_email(&code, VerificationPurpose::Register))
        .await
        .unwrap_err();
    assert!(matches!(error, DomainError::Internal { .. }));
}

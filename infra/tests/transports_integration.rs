//! Integration tests wiring the verification service to infrastructure transports

use std::sync::Arc;

use sg_core::domain::entities::verification_code::{VerificationPurpose, VerificationType};
use sg_core::repositories::VerificationCodeRepository;
use sg_core::services::{
    CaptchaCache, Clock, SystemClock, VerificationService, VerificationServiceConfig,
    VerifyCodeCommand,
};
use sg_infra::config::{EmailConfig, SmsConfig};
use sg_infra::database::create_repository;
use sg_infra::email::create_mail_transport;
use sg_infra::sms::{create_sms_transport, LoggingSmsTransport};
use sg_infra::VerificationError;

async fn service_with(
    sms: Arc<LoggingSmsTransport>,
) -> (VerificationService, Arc<dyn VerificationCodeRepository>) {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let config = VerificationServiceConfig::default();
    let repository = create_repository(None).await.unwrap();
    let captchas = Arc::new(CaptchaCache::new(clock.clone(), config.captcha_sweep_interval()));
    let mail = create_mail_transport(&EmailConfig::default()).unwrap();

    let service = VerificationService::new(
        repository.clone(),
        mail,
        sms,
        captchas,
        clock,
        config,
    );
    (service, repository)
}

#[tokio::test]
async fn test_sms_code_workflow_with_logging_transport() {
    let sms = Arc::new(LoggingSmsTransport::default());
    let (service, repository) = service_with(sms.clone()).await;

    let result = service
        .send_sms_code("13812345678", VerificationPurpose::Login)
        .await
        .unwrap();
    assert!(result.is_sent());
    assert_eq!(sms.message_count(), 1);

    let record = repository
        .find_latest(
            "13812345678",
            VerificationType::Sms,
            VerificationPurpose::Login,
            chrono::Utc::now(),
        )
        .await
        .unwrap()
        .unwrap();

    let verified = service
        .verify_code(VerifyCodeCommand {
            target: "13812345678".to_string(),
            code: record.code,
            code_type: VerificationType::Sms,
            purpose: VerificationPurpose::Login,
        })
        .await
        .unwrap();
    assert!(verified.valid);
}

#[tokio::test]
async fn test_sms_transport_failure_surfaces_generic_error() {
    let sms = Arc::new(LoggingSmsTransport::default());
    sms.set_simulate_failure(true);
    let (service, _) = service_with(sms).await;

    let error = service
        .send_sms_code("13812345678", VerificationPurpose::Register)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        sg_infra::DomainError::Verification(VerificationError::SendFailed)
    ));
}

#[tokio::test]
async fn test_email_code_with_logging_transport() {
    let (service, _) = service_with(Arc::new(LoggingSmsTransport::default())).await;

    let result = service
        .send_email_code("user@example.com", VerificationPurpose::ResetPassword)
        .await
        .unwrap();
    assert_eq!(result.message, "Verification code sent to your email");
}

#[tokio::test]
async fn test_transports_from_config() {
    let sms = create_sms_transport(&SmsConfig::default());
    assert!(sms.send_code("15912345678", "000111").await.is_ok());
}

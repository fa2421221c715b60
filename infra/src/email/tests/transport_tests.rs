//! Unit tests for mail transports

use sg_core::services::{MailMessage, MailTransport};

use crate::config::{EmailConfig, EmailTransportKind};
use crate::email::{create_mail_transport, LoggingMailTransport, SmtpMailTransport};
use crate::InfrastructureError;

fn message() -> MailMessage {
    MailMessage {
        from: "\"ShineGold\" <no-reply@shinegold.local>".to_string(),
        to: "user@example.com".to_string(),
        subject: "ShineGold - Login code".to_string(),
        html: "<div>123456</div>".to_string(),
    }
}

#[tokio::test]
async fn test_logging_transport_counts_messages() {
    let transport = LoggingMailTransport::new();

    transport.send(&message()).await.unwrap();
    transport.send(&message()).await.unwrap();

    assert_eq!(transport.message_count(), 2);
}

#[test]
fn test_build_message_sets_html_body() {
    let email = SmtpMailTransport::build_message(&message()).unwrap();
    let raw = String::from_utf8(email.formatted()).unwrap();

    assert!(raw.contains("Subject: ShineGold - Login code"));
    assert!(raw.contains("text/html"));
    assert!(raw.contains("user@example.com"));
}

#[test]
fn test_build_message_rejects_bad_recipient() {
    let mut bad = message();
    bad.to = "not-an-address".to_string();

    let error = SmtpMailTransport::build_message(&bad).unwrap_err();
    assert!(error.contains("Invalid recipient address"));
}

#[tokio::test]
async fn test_create_smtp_transport_builds_without_connecting() {
    let config = EmailConfig {
        transport: EmailTransportKind::Smtp,
        host: "smtp.example.com".to_string(),
        port: 465,
        secure: true,
        user: "codes@example.com".to_string(),
        pass: "secret".to_string(),
        ..Default::default()
    };

    assert!(create_mail_transport(&config).is_ok());
}

#[tokio::test]
async fn test_create_log_transport_by_default() {
    let transport = create_mail_transport(&EmailConfig::default()).unwrap();
    assert!(transport.send(&message()).await.is_ok());
}

#[test]
fn test_smtp_transport_requires_host() {
    let config = EmailConfig {
        transport: EmailTransportKind::Smtp,
        host: "  ".to_string(),
        ..Default::default()
    };

    assert!(matches!(
        create_mail_transport(&config),
        Err(InfrastructureError::Config(_))
    ));
}

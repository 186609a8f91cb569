//! Unit tests for email services

use om_core::services::NotifierTrait;
use om_shared::{EmailConfig, EmailProvider, SmtpConfig};

use crate::email::{create_email_service, MockEmailService, SmtpEmailService};
use crate::InfrastructureError;

fn smtp_config() -> SmtpConfig {
    SmtpConfig {
        host: "localhost".to_string(),
        port: 2525,
        from: "OtpMail <no-reply@otpmail.test>".to_string(),
        reply_to: Some("support@otpmail.test".to_string()),
        use_tls: false,
        ..SmtpConfig::default()
    }
}

#[tokio::test]
async fn test_mock_email_service_records_messages() {
    let service = MockEmailService::with_options(false, false);

    let message_id = service
        .send_email("alice@example.com", "Your OTP Code", "Your OTP is: <b>123456</b>")
        .await
        .unwrap();

    assert!(message_id.starts_with("mock_"));
    assert_eq!(service.get_message_count(), 1);

    let sent = service.last_message_to("alice@example.com").unwrap();
    assert_eq!(sent.subject, "Your OTP Code");
    assert!(sent.body.contains("123456"));
    assert_eq!(sent.message_id, message_id);
}

#[tokio::test]
async fn test_mock_email_service_failure_simulation() {
    let service = MockEmailService::with_options(false, true);

    let result = service.send_email("alice@example.com", "s", "b").await;
    assert!(result.is_err());
    assert_eq!(service.get_message_count(), 0);

    service.set_simulate_failure(false);
    assert!(service.send_email("alice@example.com", "s", "b").await.is_ok());
}

// The pooled transport spawns its reaper on the tokio runtime
#[tokio::test]
async fn test_smtp_message_headers() {
    let service = SmtpEmailService::new(&smtp_config()).unwrap();

    let (message, message_id) = service
        .build_message("alice@example.com", "Your OTP Code", "<b>123456</b>")
        .unwrap();

    assert!(message_id.ends_with("@otpmail.test>"));

    let formatted = String::from_utf8(message.formatted()).unwrap();
    assert!(formatted.contains("Subject: Your OTP Code"));
    assert!(formatted.contains("To: alice@example.com"));
    assert!(formatted.contains("Reply-To: support@otpmail.test"));
    assert!(formatted.contains(&format!("Message-ID: {}", message_id)));
    assert!(formatted.contains("text/html"));
}

#[tokio::test]
async fn test_smtp_rejects_invalid_addresses() {
    let config = SmtpConfig {
        from: "not an address".to_string(),
        ..smtp_config()
    };
    assert!(matches!(
        SmtpEmailService::new(&config),
        Err(InfrastructureError::Config(_))
    ));

    let service = SmtpEmailService::new(&smtp_config()).unwrap();
    assert!(matches!(
        service.build_message("bad address", "s", "b"),
        Err(InfrastructureError::Email(_))
    ));
}

#[tokio::test]
async fn test_create_email_service_for_each_provider() {
    let mock = EmailConfig {
        provider: EmailProvider::Mock,
        smtp: SmtpConfig::default(),
    };
    assert!(create_email_service(&mock).is_ok());

    let smtp = EmailConfig {
        provider: EmailProvider::Smtp,
        smtp: smtp_config(),
    };
    assert!(create_email_service(&smtp).is_ok());

    let broken = EmailConfig {
        provider: EmailProvider::Smtp,
        smtp: SmtpConfig {
            from: String::new(),
            ..smtp_config()
        },
    };
    assert!(create_email_service(&broken).is_err());
}

#[tokio::test]
#[ignore] // Requires an SMTP server such as MailHog on SMTP_HOST:SMTP_PORT
async fn test_smtp_delivery() {
    let config = SmtpConfig {
        host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
        port: std::env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(1025),
        ..smtp_config()
    };
    let service = SmtpEmailService::new(&config).unwrap();

    assert!(service.test_connection().await.unwrap());
    let message_id = service
        .send_email("alice@example.com", "Your OTP Code", "<b>123456</b>")
        .await
        .unwrap();
    assert!(message_id.starts_with('<'));
}

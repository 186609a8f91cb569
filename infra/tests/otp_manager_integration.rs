//! Integration tests for the OTP manager over the infrastructure adapters

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use om_core::repositories::{InMemoryOtpRepository, OtpRepository};
    use om_core::services::{
        EmailTemplate, NotificationTemplates, NotifierTrait, OtpCacheTrait, OtpManager,
        OtpServiceConfig, VerifyFailure, VerifyOutcome,
    };
    use om_core::Purpose;
    use om_infra::{HandlebarsTemplateRenderer, MemoryOtpCache, MockEmailService};

    type Manager = OtpManager<dyn OtpRepository, dyn OtpCacheTrait, dyn NotifierTrait>;

    fn manager(repository: Arc<dyn OtpRepository>, mailer: MockEmailService) -> Manager {
        let cache: Arc<dyn OtpCacheTrait> = Arc::new(MemoryOtpCache::new());
        let notifier: Arc<dyn NotifierTrait> = Arc::new(mailer);

        OtpManager::new(
            repository,
            cache,
            notifier,
            Arc::new(HandlebarsTemplateRenderer::new()),
            OtpServiceConfig::default(),
        )
    }

    fn code_from_body(body: &str) -> String {
        body.chars().filter(|c| c.is_ascii_digit()).take(6).collect()
    }

    #[tokio::test]
    async fn test_handlebars_template_reaches_mailbox() {
        let mailer = MockEmailService::with_options(false, false);
        let manager = manager(Arc::new(InMemoryOtpRepository::new()), mailer.clone())
            .with_templates(NotificationTemplates::new().with_template(
                Purpose::Signup,
                EmailTemplate {
                    subject: "Confirm {{email}}".to_string(),
                    body: "<p>{{code}}</p><p>Valid for {{ttl_minutes}} minutes</p>".to_string(),
                },
            ));

        manager.issue("carol@example.com", Purpose::Signup).await.unwrap();

        let sent = mailer.last_message_to("carol@example.com").unwrap();
        assert_eq!(sent.subject, "Confirm carol@example.com");
        assert!(sent.body.ends_with("<p>Valid for 5 minutes</p>"));

        let code = code_from_body(&sent.body);
        let outcome = manager
            .verify("carol@example.com", &code, Purpose::Signup)
            .await
            .unwrap();
        assert_eq!(outcome, VerifyOutcome::Verified);
    }

    #[tokio::test]
    async fn test_fallback_body_and_single_use() {
        let mailer = MockEmailService::with_options(false, false);
        let manager = manager(Arc::new(InMemoryOtpRepository::new()), mailer.clone());

        manager.issue("dave@example.com", Purpose::Login).await.unwrap();
        let sent = mailer.last_message_to("dave@example.com").unwrap();
        assert_eq!(sent.subject, "Your OTP Code");
        assert!(sent.body.starts_with("Your OTP is: <b>"));

        let code = code_from_body(&sent.body);
        let first = manager.verify("dave@example.com", &code, Purpose::Login).await.unwrap();
        let second = manager.verify("dave@example.com", &code, Purpose::Login).await.unwrap();

        assert!(first.is_verified());
        assert_eq!(second, VerifyOutcome::Failed(VerifyFailure::NotFound));
    }

    #[tokio::test]
    async fn test_default_initialization_is_in_memory() {
        let services = om_infra::initialize(&om_shared::AppConfig::default())
            .await
            .unwrap();

        assert!(services.database.is_none());
        assert!(services.redis.is_none());
        assert!(services.health_check().await.is_ok());

        // No pool to close; must still complete
        services.shutdown().await;
    }
}

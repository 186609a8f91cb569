//! SMTP email delivery using lettre
//!
//! Messages are sent as HTML through an async, pooled SMTP transport.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

use om_core::services::NotifierTrait;
use om_shared::validation::mask_email;
use om_shared::SmtpConfig;

use crate::InfrastructureError;

/// SMTP email service
pub struct SmtpEmailService {
    /// Pooled async SMTP transport
    transport: AsyncSmtpTransport<Tokio1Executor>,
    /// Sender mailbox
    from: Mailbox,
    /// Optional Reply-To mailbox
    reply_to: Option<Mailbox>,
}

impl SmtpEmailService {
    /// Create a new SMTP email service
    ///
    /// No connection is opened until the first message is sent.
    ///
    /// # Arguments
    ///
    /// * `config` - SMTP relay settings
    ///
    /// # Returns
    ///
    /// * `Ok(SmtpEmailService)` - Service ready to send
    /// * `Err(InfrastructureError::Config)` - Invalid sender address or relay host
    pub fn new(config: &SmtpConfig) -> Result<Self, InfrastructureError> {
        let from: Mailbox = config.from.parse().map_err(|e| {
            InfrastructureError::Config(format!("Invalid SMTP_FROM address: {}", e))
        })?;

        let reply_to = config
            .reply_to
            .as_deref()
            .map(str::parse::<Mailbox>)
            .transpose()
            .map_err(|e| {
                InfrastructureError::Config(format!("Invalid SMTP_REPLY_TO address: {}", e))
            })?;

        let mut builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host).map_err(|e| {
                InfrastructureError::Config(format!("Invalid SMTP relay {}: {}", config.host, e))
            })?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        builder = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            reply_to,
        })
    }

    /// Build the HTML message and its Message-ID
    pub fn build_message(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(Message, String), InfrastructureError> {
        let to: Mailbox = recipient.parse().map_err(|e| {
            InfrastructureError::Email(format!("Invalid recipient address: {}", e))
        })?;

        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.from.email.domain());

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .message_id(Some(message_id.clone()))
            .header(ContentType::TEXT_HTML);

        if let Some(reply_to) = &self.reply_to {
            builder = builder.reply_to(reply_to.clone());
        }

        let message = builder
            .body(body.to_string())
            .map_err(|e| InfrastructureError::Email(format!("Failed to build message: {}", e)))?;

        Ok((message, message_id))
    }

    /// Check that the relay accepts connections
    pub async fn test_connection(&self) -> Result<bool, InfrastructureError> {
        self.transport
            .test_connection()
            .await
            .map_err(|e| InfrastructureError::Email(e.to_string()))
    }
}

#[async_trait]
impl NotifierTrait for SmtpEmailService {
    async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, String> {
        let masked = mask_email(recipient);
        let (message, message_id) = self
            .build_message(recipient, subject, body)
            .map_err(|e| e.to_string())?;

        match self.transport.send(message).await {
            Ok(response) => {
                info!(
                    target: "email_service",
                    provider = "smtp",
                    recipient = %masked,
                    message_id = %message_id,
                    smtp_code = %response.code(),
                    "Email sent"
                );
                Ok(message_id)
            }
            Err(e) => {
                error!(
                    target: "email_service",
                    provider = "smtp",
                    recipient = %masked,
                    error = %e,
                    "Failed to send email"
                );
                Err(format!("SMTP delivery failed: {}", e))
            }
        }
    }
}

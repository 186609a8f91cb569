//! Email Service Module
//!
//! This module provides the email delivery implementations behind
//! `om_core::services::NotifierTrait`:
//!
//! - **SMTP**: delivery through an SMTP relay using lettre
//! - **Mock**: console output for development and tests
//!
//! Recipient addresses are masked in every log line.

use std::sync::Arc;

use om_core::services::NotifierTrait;
use om_shared::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

pub mod mock_email;
pub mod smtp;

pub use mock_email::MockEmailService;
pub use smtp::SmtpEmailService;

#[cfg(test)]
mod tests;

/// Create an email service based on configuration
///
/// # Arguments
///
/// * `config` - Email configuration containing provider settings
///
/// # Returns
///
/// The email service for the configured provider, or a configuration error
/// when SMTP settings are unusable
pub fn create_email_service(
    config: &EmailConfig,
) -> Result<Arc<dyn NotifierTrait>, InfrastructureError> {
    match config.provider {
        EmailProvider::Smtp => {
            tracing::info!(
                host = %config.smtp.host,
                port = config.smtp.port,
                "Using SMTP email service"
            );
            Ok(Arc::new(SmtpEmailService::new(&config.smtp)?))
        }
        EmailProvider::Mock => {
            tracing::warn!("Using mock email service, messages are printed instead of sent");
            Ok(Arc::new(MockEmailService::new()))
        }
    }
}

//! Notification content resolution
//!
//! A configured template for the purpose is rendered with the record as
//! context; otherwise the fixed fallback subject and body are used.

use serde_json::json;
use std::collections::HashMap;

use om_shared::OtpConfig;

use crate::domain::entities::{OtpRecord, Purpose};
use crate::errors::{DomainError, DomainResult};

use super::traits::TemplateRendererTrait;

/// Subject used when no template is configured for a purpose
pub const FALLBACK_SUBJECT: &str = "Your OTP Code";

/// Subject and body templates for one purpose
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplate {
    pub subject: String,
    pub body: String,
}

/// Rendered email ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub subject: String,
    pub body: String,
}

/// Optional template per purpose
#[derive(Debug, Clone, Default)]
pub struct NotificationTemplates {
    templates: HashMap<Purpose, EmailTemplate>,
}

impl NotificationTemplates {
    /// No templates; every purpose uses the fallback
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configuration, skipping templates keyed by unknown purposes
    pub fn from_config(config: &OtpConfig) -> Self {
        let mut templates = Self::new();

        for (key, template) in &config.templates {
            match key.parse::<Purpose>() {
                Ok(purpose) => {
                    templates = templates.with_template(
                        purpose,
                        EmailTemplate {
                            subject: template.subject.clone(),
                            body: template.body.clone(),
                        },
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        template = %key,
                        "Ignoring email template configured for unknown purpose"
                    );
                }
            }
        }

        templates
    }

    pub fn with_template(mut self, purpose: Purpose, template: EmailTemplate) -> Self {
        self.templates.insert(purpose, template);
        self
    }

    pub fn get(&self, purpose: Purpose) -> Option<&EmailTemplate> {
        self.templates.get(&purpose)
    }
}

/// Resolve subject and body for a freshly issued record
///
/// # Arguments
///
/// * `purpose` - Flow the passcode was issued for
/// * `record` - The stored record; exposed to templates as `email`, `code`,
///   `purpose`, `expires_at` and `ttl_minutes`
/// * `templates` - Configured templates
/// * `renderer` - Template engine
///
/// # Returns
///
/// * `Ok(NotificationContent)` - Rendered or fallback content
/// * `Err(DomainError::Notifier)` - A configured template failed to render
pub fn resolve_content(
    purpose: Purpose,
    record: &OtpRecord,
    templates: &NotificationTemplates,
    renderer: &dyn TemplateRendererTrait,
) -> DomainResult<NotificationContent> {
    let ttl_minutes = record.ttl_minutes();

    let Some(template) = templates.get(purpose) else {
        return Ok(NotificationContent {
            subject: FALLBACK_SUBJECT.to_string(),
            body: format!(
                "Your OTP is: <b>{}</b><br>This OTP expires in {} minutes.",
                record.code, ttl_minutes
            ),
        });
    };

    let context = json!({
        "email": record.email,
        "code": record.code,
        "purpose": purpose.as_str(),
        "expires_at": record.expires_at.to_rfc3339(),
        "ttl_minutes": ttl_minutes,
    });

    let render = |source: &str, part: &str| {
        renderer.render(source, &context).map_err(|e| DomainError::Notifier {
            message: format!("Failed to render {} template for {}: {}", part, purpose, e),
        })
    };

    Ok(NotificationContent {
        subject: render(&template.subject, "subject")?,
        body: render(&template.body, "body")?,
    })
}

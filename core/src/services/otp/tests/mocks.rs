//! Mock implementations for testing the OTP service

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::OtpRecord;
use crate::errors::DomainError;
use crate::repositories::otp::{OtpFilter, OtpRepository};
use crate::services::otp::traits::{NotifierTrait, OtpCacheTrait, TemplateRendererTrait};

// Mock cache for testing
pub struct MockOtpCache {
    pub entries: Arc<Mutex<HashMap<String, (String, u64)>>>, // key -> (code, ttl)
    pub should_fail: bool,
}

impl MockOtpCache {
    pub fn new(should_fail: bool) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn entry(&self, key: &str) -> Option<(String, u64)> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl OtpCacheTrait for MockOtpCache {
    async fn store_code(&self, key: &str, code: &str, ttl_seconds: u64) -> Result<(), String> {
        if self.should_fail {
            return Err("Cache service error".to_string());
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (code.to_string(), ttl_seconds));
        Ok(())
    }

    async fn get_code(&self, key: &str) -> Result<Option<String>, String> {
        if self.should_fail {
            return Err("Cache service error".to_string());
        }
        Ok(self.entry(key).map(|(code, _)| code))
    }

    async fn delete_code(&self, key: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("Cache service error".to_string());
        }
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

// Mock email notifier for testing
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<SentEmail>>>,
    pub should_fail: bool,
}

impl MockNotifier {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_sent(&self) -> Option<SentEmail> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl NotifierTrait for MockNotifier {
    async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, String> {
        if self.should_fail {
            return Err("Email service error".to_string());
        }
        self.sent.lock().unwrap().push(SentEmail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(format!("mock-email-{}", Uuid::new_v4()))
    }
}

// Replaces `{{name}}` with top-level context values; `{{#broken}}` fails
pub struct MockRenderer;

impl TemplateRendererTrait for MockRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, String> {
        if template.contains("{{#broken") {
            return Err("unclosed block".to_string());
        }

        let mut rendered = template.to_string();
        if let Some(fields) = context.as_object() {
            for (name, value) in fields {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                rendered = rendered.replace(&format!("{{{{{}}}}}", name), &text);
            }
        }
        Ok(rendered)
    }
}

// Repository whose every call fails, for store error propagation
pub struct FailingRepository;

fn store_down() -> DomainError {
    DomainError::Store {
        message: "connection refused".to_string(),
    }
}

#[async_trait]
impl OtpRepository for FailingRepository {
    async fn upsert_active(&self, _record: OtpRecord) -> Result<OtpRecord, DomainError> {
        Err(store_down())
    }

    async fn find(
        &self,
        _filter: &OtpFilter,
        _limit: Option<u32>,
    ) -> Result<Vec<OtpRecord>, DomainError> {
        Err(store_down())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<OtpRecord>, DomainError> {
        Err(store_down())
    }

    async fn mark_consumed(&self, _id: Uuid, _at: DateTime<Utc>) -> Result<bool, DomainError> {
        Err(store_down())
    }

    async fn delete(&self, _filter: &OtpFilter) -> Result<u64, DomainError> {
        Err(store_down())
    }
}

//! Traits for cache, template and email collaborators

use async_trait::async_trait;

/// Trait for the ephemeral passcode cache
///
/// The cache mirrors the active code of an `(email, purpose)` pair. It is never
/// consulted to decide a verification.
#[async_trait]
pub trait OtpCacheTrait: Send + Sync {
    /// Store a code under `key` with expiration
    async fn store_code(&self, key: &str, code: &str, ttl_seconds: u64) -> Result<(), String>;
    /// Get the code stored under `key`, if still present
    async fn get_code(&self, key: &str) -> Result<Option<String>, String>;
    /// Remove the entry under `key`
    async fn delete_code(&self, key: &str) -> Result<(), String>;
}

/// Trait for rendering notification templates
pub trait TemplateRendererTrait: Send + Sync {
    /// Render `template` with a JSON context
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, String>;
}

/// Trait for email delivery
#[async_trait]
pub trait NotifierTrait: Send + Sync {
    /// Send an email, returning the provider message ID
    async fn send_email(&self, recipient: &str, subject: &str, body: &str)
        -> Result<String, String>;
}

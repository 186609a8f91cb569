//! Main OTP service implementation

use chrono::Utc;
use std::sync::Arc;

use om_shared::validation::{is_valid_email, is_valid_otp_code, mask_email, normalize_email};

use crate::domain::entities::{cache_key, OtpRecord, Purpose};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::otp::{OtpFilter, OtpRepository};

use super::config::OtpServiceConfig;
use super::content::{resolve_content, NotificationTemplates};
use super::delivery::DeliveryPolicy;
use super::traits::{NotifierTrait, OtpCacheTrait, TemplateRendererTrait};
use super::types::{IssueReceipt, VerifyFailure, VerifyOutcome};

/// OTP manager issuing and verifying email passcodes
///
/// The repository is the only source of truth for verification; the cache is
/// written on issue and cleared on success but never read to decide an outcome.
pub struct OtpManager<R, C, N>
where
    R: OtpRepository + ?Sized,
    C: OtpCacheTrait + ?Sized,
    N: NotifierTrait + ?Sized,
{
    /// Durable passcode store
    repository: Arc<R>,
    /// Ephemeral mirror of active codes
    cache: Arc<C>,
    /// Email delivery
    notifier: Arc<N>,
    /// Template engine for configured templates
    renderer: Arc<dyn TemplateRendererTrait>,
    /// Per-purpose templates
    templates: NotificationTemplates,
    /// Purposes allowed to send email
    delivery_policy: DeliveryPolicy,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<R, C, N> OtpManager<R, C, N>
where
    R: OtpRepository + ?Sized,
    C: OtpCacheTrait + ?Sized,
    N: NotifierTrait + ?Sized,
{
    /// Create a new OTP manager
    ///
    /// Starts with no templates and every purpose enabled for delivery.
    ///
    /// # Arguments
    ///
    /// * `repository` - Durable store implementation
    /// * `cache` - Cache implementation
    /// * `notifier` - Email delivery implementation
    /// * `renderer` - Template engine
    /// * `config` - Service configuration
    pub fn new(
        repository: Arc<R>,
        cache: Arc<C>,
        notifier: Arc<N>,
        renderer: Arc<dyn TemplateRendererTrait>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            repository,
            cache,
            notifier,
            renderer,
            templates: NotificationTemplates::new(),
            delivery_policy: DeliveryPolicy::all_enabled(),
            config,
        }
    }

    pub fn with_templates(mut self, templates: NotificationTemplates) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_delivery_policy(mut self, delivery_policy: DeliveryPolicy) -> Self {
        self.delivery_policy = delivery_policy;
        self
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue a passcode and email it
    ///
    /// This method:
    /// 1. Validates and normalises the email
    /// 2. Generates a record and atomically replaces any unconsumed record for the pair
    /// 3. Mirrors the code into the cache
    /// 4. Checks the delivery gate for the purpose
    /// 5. Resolves the email content and dispatches it
    ///
    /// # Arguments
    ///
    /// * `email` - Recipient address
    /// * `purpose` - Flow the passcode is for
    ///
    /// # Returns
    ///
    /// * `Ok(IssueReceipt)` - The passcode was stored and sent
    /// * `Err(DomainError::DeliveryDisabled)` - Stored, but the purpose may not send email
    /// * `Err(DomainError)` - Validation, store or notifier failure
    pub async fn issue(&self, email: &str, purpose: Purpose) -> DomainResult<IssueReceipt> {
        let email = Self::validate_email(email)?;

        let record = OtpRecord::new(email.clone(), purpose, self.config.ttl());
        let record = self.repository.upsert_active(record).await?;

        if let Err(e) = self
            .cache
            .store_code(&record.cache_key(), &record.code, self.config.cache_ttl_seconds())
            .await
        {
            tracing::warn!(
                email = %mask_email(&email),
                purpose = %purpose,
                error = %e,
                "Failed to cache OTP, continuing with durable store"
            );
        }

        if !self.delivery_policy.is_purpose_enabled_for_delivery(purpose) {
            tracing::warn!(
                email = %mask_email(&email),
                purpose = %purpose,
                event = "otp_delivery_disabled",
                "OTP stored but delivery is disabled for this purpose"
            );
            return Err(DomainError::DeliveryDisabled { purpose });
        }

        let content = resolve_content(purpose, &record, &self.templates, self.renderer.as_ref())?;

        let message_id = self
            .notifier
            .send_email(&email, &content.subject, &content.body)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(&email),
                    purpose = %purpose,
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to send OTP email"
                );
                DomainError::Notifier {
                    message: format!("Failed to send OTP email: {}", e),
                }
            })?;

        tracing::info!(
            email = %mask_email(&email),
            purpose = %purpose,
            message_id = %message_id,
            expires_at = %record.expires_at,
            event = "otp_issued",
            "OTP issued"
        );

        Ok(IssueReceipt {
            email,
            purpose,
            expires_at: record.expires_at,
            message_id,
        })
    }

    /// Verify a submitted passcode
    ///
    /// Drops the cached code for `(email, purpose)`, then looks up the newest
    /// unconsumed record for `(email, code, purpose)` and consumes it with a
    /// conditional write. When several callers race on the
    /// same record only one sees `Verified`.
    ///
    /// # Arguments
    ///
    /// * `email` - Address the code was sent to
    /// * `code` - Submitted 6-digit code
    /// * `purpose` - Flow the code is being used for
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyOutcome)` - Verified, or a structured failure
    /// * `Err(DomainError::Validation)` - Missing email or malformed code, nothing was looked up
    /// * `Err(DomainError)` - Store failure
    pub async fn verify(
        &self,
        email: &str,
        code: &str,
        purpose: Purpose,
    ) -> DomainResult<VerifyOutcome> {
        let email = Self::require_email(email)?;
        self.validate_code(code)?;

        // The cached code is only a projection, drop it whatever the outcome
        self.clear_cache(&cache_key(&email, purpose), &email).await;

        let now = Utc::now();

        let record = match self.repository.find_active(&email, code, purpose).await? {
            Some(record) => record,
            None => return Ok(self.fail(&email, purpose, VerifyFailure::NotFound)),
        };

        if record.is_expired_at(now) {
            return Ok(self.fail(&email, purpose, VerifyFailure::Expired));
        }

        if !self.repository.mark_consumed(record.id, now).await? {
            // Another request consumed the record between lookup and write
            return Ok(self.fail(&email, purpose, VerifyFailure::NotFound));
        }

        tracing::info!(
            email = %mask_email(&email),
            purpose = %purpose,
            otp_id = %record.id,
            event = "otp_verified",
            "OTP verified"
        );

        Ok(VerifyOutcome::Verified)
    }

    /// Revoke the active passcode for an `(email, purpose)` pair
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of unconsumed records removed
    /// * `Err(DomainError)` - Validation or store failure
    pub async fn revoke(&self, email: &str, purpose: Purpose) -> DomainResult<u64> {
        let email = Self::require_email(email)?;

        let removed = self
            .repository
            .delete(&OtpFilter::active(email.clone(), purpose))
            .await?;
        self.clear_cache(&cache_key(&email, purpose), &email).await;

        tracing::info!(
            email = %mask_email(&email),
            purpose = %purpose,
            removed = removed,
            event = "otp_revoked",
            "OTP revoked"
        );

        Ok(removed)
    }

    fn fail(&self, email: &str, purpose: Purpose, failure: VerifyFailure) -> VerifyOutcome {
        tracing::info!(
            email = %mask_email(email),
            purpose = %purpose,
            reason = failure.reason(),
            event = "otp_verify_failed",
            "OTP verification failed"
        );
        VerifyOutcome::Failed(failure)
    }

    async fn clear_cache(&self, key: &str, email: &str) {
        if let Err(e) = self.cache.delete_code(key).await {
            tracing::warn!(
                email = %mask_email(email),
                error = %e,
                "Failed to delete cached OTP"
            );
        }
    }

    fn require_email(email: &str) -> Result<String, ValidationError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            });
        }
        Ok(email)
    }

    fn validate_email(email: &str) -> Result<String, ValidationError> {
        let email = Self::require_email(email)?;
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(email)
    }

    fn validate_code(&self, code: &str) -> Result<(), ValidationError> {
        if code.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "code".to_string(),
            });
        }
        if code.len() != self.config.code_length || !is_valid_otp_code(code) {
            return Err(ValidationError::InvalidCodeFormat);
        }
        Ok(())
    }
}

//! OTP repository trait defining the interface for passcode persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{OtpRecord, Purpose};
use crate::errors::DomainError;

/// Field filter for record lookups and deletions
///
/// Unset fields match every record. Email is compared as stored, so callers
/// pass the normalised address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpFilter {
    pub email: Option<String>,
    pub purpose: Option<Purpose>,
    pub code: Option<String>,
    pub consumed: Option<bool>,
}

impl OtpFilter {
    /// Filter matching every record
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on the unconsumed records of an `(email, purpose)` pair
    pub fn active(email: impl Into<String>, purpose: Purpose) -> Self {
        Self::new().email(email).purpose(purpose).consumed(false)
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn purpose(mut self, purpose: Purpose) -> Self {
        self.purpose = Some(purpose);
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn consumed(mut self, consumed: bool) -> Self {
        self.consumed = Some(consumed);
        self
    }

    /// Check a record against every set field
    pub fn matches(&self, record: &OtpRecord) -> bool {
        self.email.as_deref().map_or(true, |e| record.email == e)
            && self.purpose.map_or(true, |p| record.purpose == p)
            && self.code.as_deref().map_or(true, |c| record.matches_code(c))
            && self.consumed.map_or(true, |c| record.consumed == c)
    }
}

/// Repository trait for OtpRecord persistence operations
///
/// The store is the single source of truth for consumption state. Two
/// operations carry atomicity guarantees that the service relies on:
/// `upsert_active` never leaves two unconsumed records for one
/// `(email, purpose)` pair, and `mark_consumed` succeeds for at most one caller.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Atomically replace every unconsumed record for the record's
    /// `(email, purpose)` pair with `record`
    ///
    /// # Arguments
    /// * `record` - Freshly issued, unconsumed record
    ///
    /// # Returns
    /// * `Ok(OtpRecord)` - The stored record
    /// * `Err(DomainError)` - Store failure
    async fn upsert_active(&self, record: OtpRecord) -> Result<OtpRecord, DomainError>;

    /// Find records matching `filter`, newest first
    ///
    /// # Arguments
    /// * `filter` - Field filter
    /// * `limit` - Maximum number of records to return, `None` for all
    async fn find(
        &self,
        filter: &OtpFilter,
        limit: Option<u32>,
    ) -> Result<Vec<OtpRecord>, DomainError>;

    /// Find a record by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<OtpRecord>, DomainError>;

    /// Flip `consumed` on an unconsumed record
    ///
    /// Single conditional write: only the first of several concurrent callers
    /// sees `Ok(true)`.
    ///
    /// # Returns
    /// * `Ok(true)` - The record was unconsumed and is now consumed
    /// * `Ok(false)` - The record does not exist or was already consumed
    /// * `Err(DomainError)` - Store failure
    async fn mark_consumed(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Delete records matching `filter`
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of records deleted
    async fn delete(&self, filter: &OtpFilter) -> Result<u64, DomainError>;

    /// Find the newest unconsumed record for `(email, code, purpose)`
    async fn find_active(
        &self,
        email: &str,
        code: &str,
        purpose: Purpose,
    ) -> Result<Option<OtpRecord>, DomainError> {
        let filter = OtpFilter::active(email, purpose).code(code);
        Ok(self.find(&filter, Some(1)).await?.into_iter().next())
    }
}

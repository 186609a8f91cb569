//! In-process implementation of OtpRepository
//!
//! Backs single-instance deployments without a database and the service
//! tests. Every mutating operation runs under one write guard, which gives
//! the same atomicity as the MySQL implementation's single statements.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::OtpRecord;
use crate::errors::DomainError;

use super::r#trait::{OtpFilter, OtpRepository};

/// In-memory passcode repository
#[derive(Clone, Default)]
pub struct InMemoryOtpRepository {
    records: Arc<RwLock<HashMap<Uuid, OtpRecord>>>,
}

impl InMemoryOtpRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, consumed ones included
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn upsert_active(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        let mut records = self.records.write().await;

        let replaced = OtpFilter::active(record.email.clone(), record.purpose);
        records.retain(|_, existing| !replaced.matches(existing));
        records.insert(record.id, record.clone());

        Ok(record)
    }

    async fn find(
        &self,
        filter: &OtpFilter,
        limit: Option<u32>,
    ) -> Result<Vec<OtpRecord>, DomainError> {
        let records = self.records.read().await;

        let mut found: Vec<OtpRecord> = records
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if let Some(limit) = limit {
            found.truncate(limit as usize);
        }

        Ok(found)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OtpRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn mark_consumed(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;

        match records.get_mut(&id) {
            Some(record) if !record.consumed => {
                record.mark_consumed(at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, filter: &OtpFilter) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;

        let before = records.len();
        records.retain(|_, record| !filter.matches(record));

        Ok((before - records.len()) as u64)
    }
}

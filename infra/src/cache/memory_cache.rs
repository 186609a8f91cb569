//! In-process passcode cache
//!
//! Used when no Redis is configured. Expiry is checked on read and stale
//! entries are swept on write.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use om_core::services::OtpCacheTrait;

#[derive(Debug, Clone)]
struct CacheEntry {
    code: String,
    expires_at: Instant,
}

/// In-memory passcode cache with per-entry expiry
#[derive(Clone, Default)]
pub struct MemoryOtpCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryOtpCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, expired ones included until the next write
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl OtpCacheTrait for MemoryOtpCache {
    async fn store_code(&self, key: &str, code: &str, ttl_seconds: u64) -> Result<(), String> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            CacheEntry {
                code: code.to_string(),
                expires_at: now + Duration::from_secs(ttl_seconds),
            },
        );

        Ok(())
    }

    async fn get_code(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self.entries.read().await;

        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.code.clone()))
    }

    async fn delete_code(&self, key: &str) -> Result<(), String> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

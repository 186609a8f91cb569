//! Redis-backed passcode cache

use async_trait::async_trait;

use om_core::services::OtpCacheTrait;

use super::redis_client::RedisClient;

/// Passcode cache over `SET EX`, `GET` and `DEL`
///
/// Entries expire on their own through the Redis TTL.
#[derive(Clone)]
pub struct RedisOtpCache {
    client: RedisClient,
}

impl RedisOtpCache {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Remaining TTL of an entry in seconds
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, String> {
        self.client.ttl(key).await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl OtpCacheTrait for RedisOtpCache {
    async fn store_code(&self, key: &str, code: &str, ttl_seconds: u64) -> Result<(), String> {
        self.client
            .set_with_expiry(key, code, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get_code(&self, key: &str) -> Result<Option<String>, String> {
        self.client.get(key).await.map_err(|e| e.to_string())
    }

    async fn delete_code(&self, key: &str) -> Result<(), String> {
        self.client
            .delete(key)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

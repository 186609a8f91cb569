//! Cache module for passcode mirroring
//!
//! This module provides the Redis client with connection retry logic and the
//! two `OtpCacheTrait` implementations: Redis-backed and in-process.

pub mod memory_cache;
pub mod redis_client;
pub mod redis_otp_cache;

#[cfg(test)]
mod tests;

pub use memory_cache::MemoryOtpCache;
pub use redis_client::RedisClient;
pub use redis_otp_cache::RedisOtpCache;

// Re-export commonly used types
pub use om_shared::CacheConfig;

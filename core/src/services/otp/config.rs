//! Configuration for the OTP service

use chrono::Duration;
use om_shared::config::{OtpConfig, MAX_TTL_SECONDS};

use crate::domain::entities::{CODE_LENGTH, DEFAULT_TTL_SECONDS};

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Lifetime of a passcode in seconds, shared by the record and the cache entry
    pub ttl_seconds: i64,
    /// Number of digits in a passcode
    pub code_length: usize,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            code_length: CODE_LENGTH,
        }
    }
}

impl OtpServiceConfig {
    /// Passcode lifetime as a chrono duration, clamped to `0..=MAX_TTL_SECONDS`
    pub fn ttl(&self) -> Duration {
        Duration::seconds(self.bounded_ttl_seconds())
    }

    /// Cache TTL; never zero so a cache write always expires on its own
    pub fn cache_ttl_seconds(&self) -> u64 {
        self.bounded_ttl_seconds().max(1) as u64
    }

    fn bounded_ttl_seconds(&self) -> i64 {
        self.ttl_seconds.clamp(0, MAX_TTL_SECONDS)
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            ttl_seconds: config.ttl_seconds,
            ..Self::default()
        }
    }
}

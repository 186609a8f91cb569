//! One-time passcode record, the durable source of truth for verification.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::purpose::Purpose;

/// Length of a passcode
pub const CODE_LENGTH: usize = 6;

/// Default validity window for passcodes (5 minutes)
pub const DEFAULT_TTL_SECONDS: i64 = 300;

/// Prefix for cache keys that mirror the active code of an `(email, purpose)` pair
pub const CACHE_KEY_PREFIX: &str = "otp";

/// A single issued passcode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Normalised recipient address
    pub email: String,

    /// The 6-digit passcode
    pub code: String,

    /// Flow the passcode was issued for
    pub purpose: Purpose,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the passcode is unusable
    pub expires_at: DateTime<Utc>,

    /// Whether the passcode has been used
    pub consumed: bool,

    /// Timestamp of the successful verification
    pub consumed_at: Option<DateTime<Utc>>,
}

impl OtpRecord {
    /// Creates a new record with a freshly generated passcode
    ///
    /// # Arguments
    ///
    /// * `email` - Normalised recipient address
    /// * `purpose` - Flow the passcode is issued for
    /// * `ttl` - Validity window, `expires_at = created_at + ttl`, saturating
    ///   at the latest representable instant
    ///
    /// # Returns
    ///
    /// An unconsumed `OtpRecord`
    pub fn new(email: String, purpose: Purpose, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            email,
            code: Self::generate_code(),
            purpose,
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
            consumed: false,
            consumed_at: None,
        }
    }

    /// Generates a 6-digit passcode from the operating system CSPRNG
    ///
    /// Uniform over `000000..=999999`; leading zeros are kept.
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(0..1_000_000);
        format!("{:0width$}", code, width = CODE_LENGTH)
    }

    /// Whether the record is past its expiry at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Whether the record is past its expiry right now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Compares a submitted code with this record's code in constant time
    pub fn matches_code(&self, code: &str) -> bool {
        constant_time_eq::constant_time_eq(self.code.as_bytes(), code.as_bytes())
    }

    /// Validity window of the record in whole seconds
    pub fn ttl_seconds(&self) -> i64 {
        (self.expires_at - self.created_at).num_seconds()
    }

    /// Validity window rounded up to whole minutes, as shown to recipients
    pub fn ttl_minutes(&self) -> i64 {
        (self.ttl_seconds() + 59) / 60
    }

    /// Cache key mirroring this record's `(email, purpose)` pair
    pub fn cache_key(&self) -> String {
        cache_key(&self.email, self.purpose)
    }

    /// Marks the record as used
    pub fn mark_consumed(&mut self, at: DateTime<Utc>) {
        self.consumed = true;
        self.consumed_at = Some(at);
    }
}

/// Builds the cache key `otp:{email}:{purpose}`
pub fn cache_key(email: &str, purpose: Purpose) -> String {
    format!("{}:{}:{}", CACHE_KEY_PREFIX, email, purpose.as_str())
}

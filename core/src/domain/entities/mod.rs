//! Domain entities representing core business objects.

pub mod otp_record;
pub mod purpose;

// Re-export commonly used types
pub use otp_record::{cache_key, OtpRecord, CACHE_KEY_PREFIX, CODE_LENGTH, DEFAULT_TTL_SECONDS};
pub use purpose::Purpose;

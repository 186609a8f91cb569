//! Repository interfaces and the in-memory passcode store.

pub mod otp;

pub use otp::{InMemoryOtpRepository, OtpFilter, OtpRepository};

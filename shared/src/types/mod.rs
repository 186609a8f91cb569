//! Type definitions shared by the API layer
//!
//! - `response` - The status envelope returned by the OTP endpoints

pub mod response;

pub use response::{OtpResponse, ResponseStatus};

pub mod otp;

pub use om_shared::{OtpResponse, ResponseStatus};
pub use otp::{IssueOtpRequest, VerifyOtpRequest};

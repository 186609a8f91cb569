//! # OtpMail Core
//!
//! Core business logic and domain layer for the OtpMail backend.
//! This crate contains the passcode entity, the OTP manager service, the
//! repository and collaborator interfaces, and the error types that the
//! infrastructure and API crates build on.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;

//! OTP service module for email passcodes
//!
//! This module provides the issue and verify workflow:
//! - Passcode generation and persistence with per-pair replacement
//! - Cache mirroring of the active code
//! - Template resolution and email dispatch behind a delivery gate
//! - Single-use verification against the durable store

mod config;
mod content;
mod delivery;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use content::{
    resolve_content, EmailTemplate, NotificationContent, NotificationTemplates,
    FALLBACK_SUBJECT,
};
pub use delivery::DeliveryPolicy;
pub use service::OtpManager;
pub use traits::{NotifierTrait, OtpCacheTrait, TemplateRendererTrait};
pub use types::{IssueReceipt, VerifyFailure, VerifyOutcome};

//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    resolve_content, DeliveryPolicy, EmailTemplate, IssueReceipt, NotificationContent,
    NotificationTemplates, NotifierTrait, OtpCacheTrait, OtpManager, OtpServiceConfig,
    TemplateRendererTrait, VerifyFailure, VerifyOutcome,
};

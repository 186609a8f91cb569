//! Shared utilities and common types for the OtpMail server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON response envelope returned by the OTP endpoints
//! - Utility functions (email validation, masking, code format checks)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CacheStrategyConfig, CacheType, CorsConfig, DatabaseConfig,
    EmailConfig, EmailProvider, Environment, LogFormat, LoggingConfig, OtpConfig,
    ServerConfig, SmtpConfig, TemplateConfig,
};
pub use types::{OtpResponse, ResponseStatus};
pub use utils::validation;

//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Cache backend selection and Redis configuration
//! - `database` - Database connection and pool configuration
//! - `email` - Email provider and SMTP configuration
//! - `environment` - Environment detection and logging configuration
//! - `otp` - Passcode lifetime, delivery allow-list and templates
//! - `server` - HTTP server and CORS configuration

pub mod cache;
pub mod database;
pub mod email;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::{CacheConfig, CacheStrategyConfig, CacheType};
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider, SmtpConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::{OtpConfig, TemplateConfig, MAX_TTL_SECONDS};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration; `None` selects the in-memory store
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Cache configuration
    pub cache: CacheStrategyConfig,

    /// Passcode configuration
    pub otp: OtpConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: None,
            cache: CacheStrategyConfig::default(),
            otp: OtpConfig::default(),
            email: EmailConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    ///
    /// The database section is only present when `DATABASE_URL` is set.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let database = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|_| DatabaseConfig::from_env());

        Self {
            environment,
            server: ServerConfig::from_env(),
            database,
            cache: CacheStrategyConfig::from_env(),
            otp: OtpConfig::from_env(),
            email: EmailConfig::from_env(),
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}

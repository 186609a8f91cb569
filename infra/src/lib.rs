//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the OtpMail application.
//! It provides concrete implementations of the collaborator traits declared in
//! `om_core`: durable storage, caching, email delivery and template rendering.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL passcode repository using SQLx
//! - **Cache**: Redis client and an in-process fallback for passcode mirroring
//! - **Email**: SMTP delivery through lettre and a logging mock
//! - **Templates**: Handlebars rendering of per-purpose email templates

use std::sync::Arc;

use om_core::repositories::{InMemoryOtpRepository, OtpRepository};
use om_core::services::{NotifierTrait, OtpCacheTrait, TemplateRendererTrait};
use om_shared::{AppConfig, CacheType};

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and passcode caches
pub mod cache;

/// Email module - SMTP and mock delivery
pub mod email;

/// Template module - Handlebars rendering
pub mod template;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration management for infrastructure services
    //!
    //! Loads `.env` and reads every section from the environment.

    use om_shared::AppConfig;

    pub use om_shared::{CacheConfig, DatabaseConfig, EmailConfig, SmtpConfig};

    /// Load the application configuration from the environment
    pub fn load_config() -> AppConfig {
        dotenvy::dotenv().ok(); // Load .env file if present
        AppConfig::from_env()
    }
}

pub use cache::{MemoryOtpCache, RedisClient, RedisOtpCache};
pub use database::{DatabasePool, MySqlOtpRepository};
pub use email::{create_email_service, MockEmailService, SmtpEmailService};
pub use template::HandlebarsTemplateRenderer;

/// Infrastructure service container
///
/// Holds the trait objects the OTP manager is built from, plus the concrete
/// clients that back health checks.
#[derive(Clone)]
pub struct InfrastructureServices {
    pub repository: Arc<dyn OtpRepository>,
    pub cache: Arc<dyn OtpCacheTrait>,
    pub notifier: Arc<dyn NotifierTrait>,
    pub renderer: Arc<dyn TemplateRendererTrait>,
    pub database: Option<DatabasePool>,
    pub redis: Option<RedisClient>,
}

impl InfrastructureServices {
    /// Check every configured backing service
    ///
    /// The in-memory store and cache are always healthy.
    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        if let Some(database) = &self.database {
            tracing::debug!(stats = %database.get_statistics(), "Database pool");
            if !database.health_check().await? {
                return Err(InfrastructureError::General(
                    "Database health check failed".to_string(),
                ));
            }
        }

        if let Some(redis) = &self.redis {
            if !redis.health_check().await? {
                return Err(InfrastructureError::General(
                    "Redis health check failed".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Release pooled connections; called once the server has stopped
    pub async fn shutdown(&self) {
        if let Some(database) = &self.database {
            tracing::info!(stats = %database.get_statistics(), "Database pool at shutdown");
            database.close().await;
        }
    }
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - The MySQL pool and repository when a database is configured, the in-memory store otherwise
/// - The Redis client or the in-process cache, per `CACHE_TYPE`
/// - The email service, per `EMAIL_PROVIDER`
/// - The Handlebars template renderer
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let (repository, database): (Arc<dyn OtpRepository>, Option<DatabasePool>) =
        match &config.database {
            Some(db_config) => {
                let pool = DatabasePool::new(db_config.clone()).await?;
                if db_config.run_migrations {
                    pool.run_migrations().await?;
                }
                let repository = MySqlOtpRepository::new(pool.get_pool().clone());
                (Arc::new(repository), Some(pool))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory OTP store");
                (Arc::new(InMemoryOtpRepository::new()), None)
            }
        };

    let (cache, redis): (Arc<dyn OtpCacheTrait>, Option<RedisClient>) =
        match (config.cache.cache_type, &config.cache.redis) {
            (CacheType::Redis, Some(redis_config)) => {
                let client = RedisClient::new(redis_config.clone()).await?;
                (Arc::new(RedisOtpCache::new(client.clone())), Some(client))
            }
            (CacheType::Redis, None) => {
                return Err(InfrastructureError::Config(
                    "CACHE_TYPE is redis but no Redis configuration was loaded".to_string(),
                ));
            }
            (CacheType::Memory, _) => {
                tracing::info!("Using in-memory OTP cache");
                (Arc::new(MemoryOtpCache::new()), None)
            }
        };

    let notifier = create_email_service(&config.email)?;
    let renderer: Arc<dyn TemplateRendererTrait> = Arc::new(HandlebarsTemplateRenderer::new());

    tracing::info!("Infrastructure services initialized successfully");

    Ok(InfrastructureServices {
        repository,
        cache,
        notifier,
        renderer,
        database,
        redis,
    })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Email delivery error
    #[error("Email error: {0}")]
    Email(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

//! Email delivery configuration module

use serde::{Deserialize, Serialize};

/// Email provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Deliver through an SMTP relay
    Smtp,
    /// Log messages instead of sending them
    Mock,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(EmailProvider::Smtp),
            "mock" | "console" => Ok(EmailProvider::Mock),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// SMTP relay configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// SMTP host
    pub host: String,

    /// SMTP port (defaults to the submission port)
    pub port: u16,

    /// SMTP username
    pub username: String,

    /// SMTP password
    pub password: String,

    /// Sender address, e.g. `OtpMail <no-reply@example.com>`
    pub from: String,

    /// Reply-To address
    #[serde(default)]
    pub reply_to: Option<String>,

    /// Whether to use STARTTLS
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,

    /// Send timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 587,
            username: String::new(),
            password: String::new(),
            from: String::from("no-reply@localhost"),
            reply_to: None,
            use_tls: default_use_tls(),
            timeout_secs: default_timeout(),
        }
    }
}

impl SmtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SMTP_HOST").unwrap_or(defaults.host),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from: std::env::var("SMTP_FROM").unwrap_or(defaults.from),
            reply_to: std::env::var("SMTP_REPLY_TO").ok(),
            use_tls: std::env::var("SMTP_USE_TLS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.use_tls),
            timeout_secs: defaults.timeout_secs,
        }
    }
}

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Email provider ("smtp", "mock")
    pub provider: EmailProvider,

    /// SMTP settings, used when `provider` is `smtp`
    #[serde(default)]
    pub smtp: SmtpConfig,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            smtp: SmtpConfig::default(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let provider = std::env::var("EMAIL_PROVIDER")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(EmailProvider::Mock);

        Self {
            provider,
            smtp: SmtpConfig::from_env(),
        }
    }
}

fn default_use_tls() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

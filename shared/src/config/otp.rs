//! One-time passcode configuration module

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const TEMPLATE_PREFIX: &str = "OTP_TEMPLATE_";

/// Longest accepted passcode lifetime (one day)
pub const MAX_TTL_SECONDS: i64 = 86_400;

/// Email template for a purpose, in Handlebars syntax
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TemplateConfig {
    /// Subject line template
    pub subject: String,
    /// Body template (HTML)
    pub body: String,
}

/// Passcode lifecycle and delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Lifetime of a passcode in seconds, shared by the record and the cache entry
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,

    /// Purposes allowed to send email; `None` enables every purpose
    #[serde(default)]
    pub delivery_enabled_purposes: Option<Vec<String>>,

    /// Templates keyed by purpose identifier (`login`, `signup`, ...)
    #[serde(default)]
    pub templates: HashMap<String, TemplateConfig>,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            delivery_enabled_purposes: None,
            templates: HashMap::new(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    ///
    /// - `OTP_TTL_SECONDS` (1..=86400, anything else falls back to the default)
    /// - `OTP_DELIVERY_ENABLED_PURPOSES` (comma separated, empty disables all)
    /// - `OTP_TEMPLATE_<PURPOSE>_SUBJECT` and `OTP_TEMPLATE_<PURPOSE>_BODY`
    pub fn from_env() -> Self {
        let ttl_seconds = parse_ttl(std::env::var("OTP_TTL_SECONDS").ok().as_deref());

        let delivery_enabled_purposes = std::env::var("OTP_DELIVERY_ENABLED_PURPOSES")
            .ok()
            .map(|list| parse_list(&list));

        Self {
            ttl_seconds,
            delivery_enabled_purposes,
            templates: templates_from_vars(std::env::vars()),
        }
    }

    /// TTL in whole minutes, for message text
    pub fn ttl_minutes(&self) -> i64 {
        (self.ttl_seconds + 59) / 60
    }
}

fn parse_ttl(value: Option<&str>) -> i64 {
    let Some(value) = value else {
        return default_ttl_seconds();
    };

    match value.trim().parse::<i64>() {
        Ok(ttl) if (1..=MAX_TTL_SECONDS).contains(&ttl) => ttl,
        _ => {
            tracing::warn!(
                value = %value,
                max = MAX_TTL_SECONDS,
                "OTP_TTL_SECONDS out of range, using default"
            );
            default_ttl_seconds()
        }
    }
}

fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Collect `OTP_TEMPLATE_<PURPOSE>_{SUBJECT,BODY}` pairs; incomplete pairs are ignored
fn templates_from_vars(
    vars: impl Iterator<Item = (String, String)>,
) -> HashMap<String, TemplateConfig> {
    let mut subjects = HashMap::new();
    let mut bodies = HashMap::new();

    for (key, value) in vars {
        let Some(rest) = key.strip_prefix(TEMPLATE_PREFIX) else {
            continue;
        };
        if let Some(purpose) = rest.strip_suffix("_SUBJECT") {
            subjects.insert(purpose.to_lowercase(), value);
        } else if let Some(purpose) = rest.strip_suffix("_BODY") {
            bodies.insert(purpose.to_lowercase(), value);
        }
    }

    subjects
        .into_iter()
        .filter_map(|(purpose, subject)| {
            bodies
                .remove(&purpose)
                .map(|body| (purpose, TemplateConfig { subject, body }))
        })
        .collect()
}

fn default_ttl_seconds() -> i64 {
    300 // 5 minutes
}

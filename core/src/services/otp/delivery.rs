//! Delivery gate deciding which purposes may send email

use std::collections::HashSet;

use om_shared::OtpConfig;

use crate::domain::entities::Purpose;

/// Allow-list of purposes enabled for email delivery
///
/// Records for a disabled purpose are still persisted; only dispatch is skipped.
#[derive(Debug, Clone)]
pub struct DeliveryPolicy {
    enabled: HashSet<Purpose>,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self::all_enabled()
    }
}

impl DeliveryPolicy {
    /// Every purpose may send
    pub fn all_enabled() -> Self {
        Self {
            enabled: Purpose::ALL.into_iter().collect(),
        }
    }

    /// Only the given purposes may send
    pub fn only(purposes: impl IntoIterator<Item = Purpose>) -> Self {
        Self {
            enabled: purposes.into_iter().collect(),
        }
    }

    /// Build from configuration
    ///
    /// An absent list enables every purpose. Unknown identifiers are logged and ignored.
    pub fn from_config(config: &OtpConfig) -> Self {
        let Some(list) = &config.delivery_enabled_purposes else {
            return Self::all_enabled();
        };

        let purposes = list.iter().filter_map(|value| match value.parse::<Purpose>() {
            Ok(purpose) => Some(purpose),
            Err(_) => {
                tracing::warn!(purpose = %value, "Ignoring unknown purpose in delivery allow-list");
                None
            }
        });

        Self::only(purposes)
    }

    pub fn is_purpose_enabled_for_delivery(&self, purpose: Purpose) -> bool {
        self.enabled.contains(&purpose)
    }
}

//! API response types

use serde::{Deserialize, Serialize};

/// Response status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Failed,
}

/// Envelope returned by the issue and verify endpoints
///
/// Issue responses carry `message`; verify failures carry `reason`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpResponse {
    /// Outcome of the call
    pub status: ResponseStatus,

    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Failure reason (verification only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl OtpResponse {
    /// Successful call without payload
    pub fn success() -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            reason: None,
        }
    }

    /// Successful call with a message
    pub fn success_with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::success()
        }
    }

    /// Failed call with a message
    pub fn failed_with_message(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Failed,
            message: Some(message.into()),
            reason: None,
        }
    }

    /// Failed call with a reason
    pub fn failed_with_reason(reason: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Failed,
            message: None,
            reason: Some(reason.into()),
        }
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

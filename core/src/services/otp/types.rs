//! Types for OTP service results

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::domain::entities::Purpose;

/// Result of issuing a passcode
///
/// Deliberately carries no code: delivery is strictly out-of-band.
#[derive(Debug, Clone, Serialize)]
pub struct IssueReceipt {
    /// Normalised recipient address
    pub email: String,
    /// Flow the passcode was issued for
    pub purpose: Purpose,
    /// When the passcode stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Message ID returned by the email provider
    pub message_id: String,
}

/// Why a verification did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyFailure {
    /// No unconsumed record matches: never issued, wrong code, already used or superseded
    NotFound,
    /// A matching unconsumed record exists but is past its expiry
    Expired,
}

impl VerifyFailure {
    /// Caller-facing reason
    pub fn reason(&self) -> &'static str {
        match self {
            VerifyFailure::NotFound => "expired or not found",
            VerifyFailure::Expired => "expired",
        }
    }
}

impl fmt::Display for VerifyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Result of verifying a passcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    Failed(VerifyFailure),
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }

    /// Failure reason, `None` when verified
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            VerifyOutcome::Verified => None,
            VerifyOutcome::Failed(failure) => Some(failure.reason()),
        }
    }
}

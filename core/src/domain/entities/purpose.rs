//! Purpose tag distinguishing which flow a passcode was issued for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Flow a passcode belongs to
///
/// A code issued for one purpose never verifies for another. New flows are
/// added as new variants; the wire identifier is the snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    /// Signing in to an existing account
    Login,
    /// Confirming the address of a new account
    Signup,
    /// Authorising a password reset
    PasswordReset,
    /// Confirming a new address during an email change
    EmailChange,
}

impl Purpose {
    /// Every known purpose
    pub const ALL: [Purpose; 4] = [
        Purpose::Login,
        Purpose::Signup,
        Purpose::PasswordReset,
        Purpose::EmailChange,
    ];

    /// Wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Login => "login",
            Purpose::Signup => "signup",
            Purpose::PasswordReset => "password_reset",
            Purpose::EmailChange => "email_change",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "login" => Ok(Purpose::Login),
            "signup" | "sign_up" => Ok(Purpose::Signup),
            "password_reset" => Ok(Purpose::PasswordReset),
            "email_change" => Ok(Purpose::EmailChange),
            "" => Err(ValidationError::RequiredField {
                field: "purpose".to_string(),
            }),
            _ => Err(ValidationError::UnknownPurpose {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_wire_identifier() {
        for purpose in Purpose::ALL {
            assert_eq!(purpose.as_str().parse::<Purpose>().unwrap(), purpose);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Signup".parse::<Purpose>().unwrap(), Purpose::Signup);
        assert_eq!(" LOGIN ".parse::<Purpose>().unwrap(), Purpose::Login);
    }

    #[test]
    fn test_unknown_purpose_is_rejected() {
        match "checkout".parse::<Purpose>() {
            Err(ValidationError::UnknownPurpose { value }) => assert_eq!(value, "checkout"),
            other => panic!("Expected unknown purpose error, got {:?}", other),
        }
        assert!(matches!(
            "".parse::<Purpose>(),
            Err(ValidationError::RequiredField { .. })
        ));
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Purpose::PasswordReset).unwrap();
        assert_eq!(json, "\"password_reset\"");
    }
}

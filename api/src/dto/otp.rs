use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/v1/otp/issue`
///
/// Missing fields deserialize as empty strings so they are reported by
/// validation rather than by the JSON extractor.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IssueOtpRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 254, message = "email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 32, message = "purpose is required"))]
    pub purpose: String,
}

/// Body of `POST /api/v1/otp/verify`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 254, message = "email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(equal = 6, message = "code must be 6 digits"))]
    pub code: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 32, message = "purpose is required"))]
    pub purpose: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_request_validation() {
        let valid = IssueOtpRequest {
            email: "alice@example.com".to_string(),
            purpose: "login".to_string(),
        };
        assert!(valid.validate().is_ok());

        let missing_purpose = IssueOtpRequest {
            email: "alice@example.com".to_string(),
            purpose: String::new(),
        };
        assert!(missing_purpose.validate().is_err());
    }

    #[test]
    fn test_verify_code_length() {
        let mut request = VerifyOtpRequest {
            email: "alice@example.com".to_string(),
            code: "123456".to_string(),
            purpose: "signup".to_string(),
        };
        assert!(request.validate().is_ok());

        request.code = "12345".to_string();
        assert!(request.validate().is_err());

        request.code = "1234567".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let request: VerifyOtpRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert!(request.code.is_empty());
        assert!(request.purpose.is_empty());
        assert!(request.validate().is_err());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use nxt_core::domain::entities::{KycAccount, UserRole};

/// Body of `POST /api/v1/auth/kyc/send-otp`
///
/// Missing fields deserialize as empty strings so that they are reported
/// through validation rather than as a JSON error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    #[serde(default)]
    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[serde(default)]
    #[validate(custom = "validate_user_type")]
    pub user_type: String,
}

/// Body of `POST /api/v1/auth/kyc/verify-otp`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[serde(default)]
    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[serde(default)]
    #[validate(custom = "validate_user_type")]
    pub user_type: String,

    #[serde(default)]
    #[validate(length(equal = 6, message = "Valid 6-digit OTP is required"))]
    pub otp: String,

    #[serde(default)]
    #[validate(custom = "validate_user_id")]
    pub user_id: String,
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if nxt_shared::phone::meets_min_length(phone) {
        Ok(())
    } else {
        Err(invalid("phone", "Valid phone number is required"))
    }
}

fn validate_user_type(user_type: &str) -> Result<(), ValidationError> {
    user_type
        .parse::<UserRole>()
        .map(|_| ())
        .map_err(|_| invalid("user_type", "Valid user type is required"))
}

fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if user_id.trim().is_empty() {
        Err(invalid("user_id", "User ID is required"))
    } else {
        Ok(())
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResponse {
    pub message: String,
    pub phone: String,
    pub user_type: UserRole,
    pub expires_at: DateTime<Utc>,
}

/// Account fields returned after a successful verification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycAccountDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub phone_verified: bool,
    #[serde(rename = "isKYCVerified")]
    pub is_kyc_verified: bool,
}

impl From<KycAccount> for KycAccountDto {
    fn from(account: KycAccount) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            phone: account.phone,
            phone_verified: account.phone_verified,
            is_kyc_verified: account.is_kyc_verified,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub message: String,
    pub phone: String,
    pub user_type: UserRole,
    pub user: KycAccountDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verify_request(phone: &str, user_type: &str, otp: &str, user_id: &str) -> VerifyOtpRequest {
        VerifyOtpRequest {
            phone: phone.to_string(),
            user_type: user_type.to_string(),
            otp: otp.to_string(),
            user_id: user_id.to_string(),
        }
    }

    #[test]
    fn test_send_request_deserializes_camel_case() {
        let request: SendOtpRequest =
            serde_json::from_str(r#"{"phone":"+15551234567","userType":"recruiter"}"#).unwrap();
        assert_eq!(request.user_type, "recruiter");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_send_request_rejects_short_phone_and_bad_type() {
        let request: SendOtpRequest =
            serde_json::from_str(r#"{"phone":"  12345  ","userType":"admin"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("user_type"));
    }

    #[test]
    fn test_missing_fields_fail_validation() {
        let request: VerifyOtpRequest = serde_json::from_str("{}").unwrap();
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 4);
    }

    #[test]
    fn test_verify_request_valid() {
        assert!(verify_request("+15551234567", "applicant", "123456", "u1")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_verify_request_code_length() {
        assert!(verify_request("+15551234567", "applicant", "12345", "u1")
            .validate()
            .is_err());
        assert!(verify_request("+15551234567", "applicant", "1234567", "u1")
            .validate()
            .is_err());
    }

    #[test]
    fn test_account_dto_field_names() {
        let account = KycAccount::new("u1", UserRole::Applicant, "Ada", "Lovelace", "ada@example.com");
        let json = serde_json::to_value(KycAccountDto::from(account)).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["isKYCVerified"], false);
        assert_eq!(json["phoneVerified"], false);
    }
}

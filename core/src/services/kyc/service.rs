//! KYC service implementation

use chrono::Utc;
use std::sync::Arc;

use nxt_shared::phone::{mask_phone_number, meets_min_length};

use crate::domain::entities::otp_record::{UserRole, CODE_LENGTH};
use crate::domain::entities::verification_outcome::VerificationOutcome;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::KycAccountRepository;
use crate::services::otp::{OtpService, OtpStoreTrait, SendCodeResult, SmsServiceTrait};

use super::types::KycVerification;

/// Phone KYC for applicants and recruiters
pub struct KycService<S: SmsServiceTrait, C: OtpStoreTrait, R: KycAccountRepository> {
    otp_service: Arc<OtpService<S, C>>,
    accounts: Arc<R>,
}

impl<S: SmsServiceTrait, C: OtpStoreTrait, R: KycAccountRepository> KycService<S, C, R> {
    pub fn new(otp_service: Arc<OtpService<S, C>>, accounts: Arc<R>) -> Self {
        Self {
            otp_service,
            accounts,
        }
    }

    pub fn otp_service(&self) -> &Arc<OtpService<S, C>> {
        &self.otp_service
    }

    /// Send a KYC code to `phone` for the given user type
    ///
    /// # Arguments
    ///
    /// * `phone` - Raw phone input; surrounding whitespace is dropped
    /// * `user_type` - `applicant` or `recruiter`
    pub async fn request_otp(&self, phone: &str, user_type: &str) -> DomainResult<SendCodeResult> {
        let phone = validate_phone(phone)?;
        let role = parse_role(user_type)?;

        self.otp_service.send_code(phone, role).await
    }

    /// Verify a KYC code and, on success, mark the account's phone verified
    ///
    /// # Returns
    ///
    /// * `Ok(KycVerification::Verified)` - The updated account
    /// * `Ok(KycVerification::Rejected)` - The code was refused
    /// * `Err(DomainError::NotFound)` - The code was accepted but no such account exists
    pub async fn verify_otp(
        &self,
        phone: &str,
        user_type: &str,
        code: &str,
        user_id: &str,
    ) -> DomainResult<KycVerification> {
        let phone = validate_phone(phone)?;
        let role = parse_role(user_type)?;
        validate_code(code)?;
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "userId".to_string(),
            }
            .into());
        }

        let outcome = self.otp_service.verify_code(phone, role, code).await?;
        if let VerificationOutcome::Rejected(reason) = outcome {
            return Ok(KycVerification::Rejected(reason));
        }

        // The code is consumed at this point; a missing account needs a new one.
        let mut account = self
            .accounts
            .find_by_id(role, user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "User".to_string(),
            })?;

        account.mark_phone_verified(phone, Utc::now());
        let account = self.accounts.update(account).await?;

        tracing::info!(
            phone = %mask_phone_number(phone),
            role = %role,
            user_id = %account.id,
            event = "kyc_verified",
            "KYC verification completed"
        );

        Ok(KycVerification::Verified(account))
    }
}

fn validate_phone(phone: &str) -> Result<&str, ValidationError> {
    let trimmed = phone.trim();
    if meets_min_length(trimmed) {
        Ok(trimmed)
    } else {
        Err(ValidationError::InvalidPhone {
            phone: mask_phone_number(trimmed),
        })
    }
}

fn parse_role(user_type: &str) -> Result<UserRole, ValidationError> {
    user_type.parse().map_err(|_| ValidationError::UnknownRole {
        value: user_type.to_string(),
    })
}

fn validate_code(code: &str) -> Result<(), ValidationError> {
    if code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCodeFormat)
    }
}

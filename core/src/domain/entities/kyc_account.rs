//! Account whose phone number is confirmed through KYC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::otp_record::UserRole;

/// Applicant or recruiter account as seen by the KYC flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycAccount {
    /// Opaque account identifier
    pub id: String,

    pub role: UserRole,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    /// Phone on file; replaced by the verified number
    #[serde(default)]
    pub phone: Option<String>,

    pub phone_verified: bool,

    #[serde(rename = "isKYCVerified")]
    pub is_kyc_verified: bool,

    pub updated_at: DateTime<Utc>,
}

impl KycAccount {
    /// Creates an unverified account
    pub fn new(
        id: impl Into<String>,
        role: UserRole,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: None,
            phone_verified: false,
            is_kyc_verified: false,
            updated_at: Utc::now(),
        }
    }

    /// Records a phone number that passed OTP verification
    pub fn mark_phone_verified(&mut self, phone: impl Into<String>, now: DateTime<Utc>) {
        self.phone = Some(phone.into());
        self.phone_verified = true;
        self.is_kyc_verified = true;
        self.updated_at = now;
    }
}

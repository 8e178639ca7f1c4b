//! OTP record entity and the (phone, role) key it is stored under.

use chrono::{DateTime, TimeDelta, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::verification_outcome::{RejectionReason, VerificationOutcome};

/// Maximum number of verification attempts allowed per code
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// Account role a code is issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Applicant,
    Recruiter,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Applicant => "applicant",
            UserRole::Recruiter => "recruiter",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applicant" => Ok(UserRole::Applicant),
            "recruiter" => Ok(UserRole::Recruiter),
            other => Err(format!("Unknown user type: {}", other)),
        }
    }
}

/// Store key for an OTP record.
///
/// The phone is kept exactly as submitted; the same number spelled two
/// different ways yields two different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OtpKey {
    pub phone: String,
    pub role: UserRole,
}

impl OtpKey {
    pub fn new(phone: impl Into<String>, role: UserRole) -> Self {
        Self {
            phone: phone.into(),
            role,
        }
    }
}

impl fmt::Display for OtpKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.role, self.phone)
    }
}

/// A pending one-time passcode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// The 6-digit code that was delivered
    pub code: String,

    /// Absolute instant after which the code is no longer accepted
    pub expires_at: DateTime<Utc>,

    /// Verification attempts consumed so far
    pub attempts: u32,
}

impl OtpRecord {
    /// Creates a fresh record valid for `expiration_minutes` from `now`.
    ///
    /// Returns `None` when the expiry is not representable.
    pub fn new(code: impl Into<String>, now: DateTime<Utc>, expiration_minutes: i64) -> Option<Self> {
        let expires_at = TimeDelta::try_minutes(expiration_minutes)
            .and_then(|window| now.checked_add_signed(window))?;
        Some(Self {
            code: code.into(),
            expires_at,
            attempts: 0,
        })
    }

    /// A record is valid up to and including `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Runs one verification step against this record.
    ///
    /// Order is fixed: expiry, exhausted budget, consume an attempt, compare.
    /// A wrong code that uses up the last attempt reports `TooManyAttempts`
    /// rather than `InvalidCode`.
    /// The caller must drop the record whenever the returned outcome
    /// [evicts](VerificationOutcome::evicts_record) it.
    pub fn attempt(&mut self, input: &str, now: DateTime<Utc>, max_attempts: u32) -> VerificationOutcome {
        if self.is_expired_at(now) {
            return VerificationOutcome::Rejected(RejectionReason::Expired);
        }

        if self.attempts >= max_attempts {
            return VerificationOutcome::Rejected(RejectionReason::TooManyAttempts);
        }

        self.attempts += 1;

        if constant_time_eq(self.code.as_bytes(), input.as_bytes()) {
            VerificationOutcome::Accepted
        } else if self.attempts >= max_attempts {
            VerificationOutcome::Rejected(RejectionReason::TooManyAttempts)
        } else {
            VerificationOutcome::Rejected(RejectionReason::InvalidCode)
        }
    }
}

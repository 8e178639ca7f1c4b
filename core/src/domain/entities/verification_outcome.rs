//! Result of checking user input against a stored OTP.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a verification attempt was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// No live record for the key
    NotFound,
    /// The record outlived its expiry
    Expired,
    /// The attempt budget is spent
    TooManyAttempts,
    /// Wrong code, attempts remain
    InvalidCode,
}

impl RejectionReason {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::NotFound => "otp_not_found",
            RejectionReason::Expired => "otp_expired",
            RejectionReason::TooManyAttempts => "otp_too_many_attempts",
            RejectionReason::InvalidCode => "otp_invalid",
        }
    }

    /// User-facing message
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::NotFound => "OTP not found or expired",
            RejectionReason::Expired => "OTP has expired",
            RejectionReason::TooManyAttempts => "Too many attempts. Please request a new OTP",
            RejectionReason::InvalidCode => "Invalid OTP",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a single verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationOutcome {
    Accepted,
    Rejected(RejectionReason),
}

impl VerificationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, VerificationOutcome::Accepted)
    }

    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            VerificationOutcome::Accepted => None,
            VerificationOutcome::Rejected(reason) => Some(*reason),
        }
    }

    /// Whether the record must be removed after this outcome.
    ///
    /// Only a wrong code with attempts left keeps the record. `NotFound`
    /// has nothing to remove.
    pub fn evicts_record(&self) -> bool {
        matches!(
            self,
            VerificationOutcome::Accepted
                | VerificationOutcome::Rejected(RejectionReason::Expired)
                | VerificationOutcome::Rejected(RejectionReason::TooManyAttempts)
        )
    }
}

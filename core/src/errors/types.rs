//! Error types for the OTP lifecycle and request validation
//!
//! Verification rejections are not errors; they are reported through
//! `VerificationOutcome`. The types here cover everything that prevents an
//! operation from producing an outcome at all.

use thiserror::Error;

/// OTP lifecycle failures
#[derive(Error, Debug)]
pub enum OtpError {
    /// The gateway refused or timed out. The stored code stays valid.
    #[error("Failed to deliver OTP: {reason}")]
    DeliveryFailed { reason: String },
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Valid phone number is required")]
    InvalidPhone { phone: String },

    #[error("Valid 6-digit OTP is required")]
    InvalidCodeFormat,

    #[error("Valid user type is required: {value}")]
    UnknownRole { value: String },

    #[error("Required field: {field}")]
    RequiredField { field: String },
}

impl ValidationError {
    /// Name of the request field the error refers to
    pub fn field(&self) -> &str {
        match self {
            ValidationError::InvalidPhone { .. } => "phone",
            ValidationError::InvalidCodeFormat => "otp",
            ValidationError::UnknownRole { .. } => "userType",
            ValidationError::RequiredField { field } => field,
        }
    }
}

//! KYC phone verification built on the OTP lifecycle
//!
//! Validates raw request input, drives [`OtpService`](crate::services::otp::OtpService)
//! and, once a code is accepted, marks the account's phone as verified.

mod service;
mod types;


pub use service::KycService;
pub use types::KycVerification;

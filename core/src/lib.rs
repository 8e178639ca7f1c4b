//! # NxtBeings Core
//!
//! Core business logic and domain layer for the NxtBeings backend.
//! This crate contains the OTP lifecycle used for phone KYC, the KYC service
//! built on top of it, repository interfaces and the domain error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::KycAccountRepository;
pub use services::*;

//! OTP lifecycle module for phone-based KYC verification
//!
//! This module provides the complete one-time passcode workflow:
//! - Code generation from the OS CSPRNG
//! - Storage keyed by (phone, role), overwriting on every send
//! - SMS dispatch through an injected gateway, bounded by a timeout
//! - Verification with expiry and attempt limiting
//! - Periodic sweeping of abandoned codes

mod config;
mod generator;
mod service;
mod sweeper;
mod traits;
mod types;


pub use config::OtpServiceConfig;
pub use generator::generate_code;
pub use service::OtpService;
pub use sweeper::{OtpSweeper, SweeperHandle};
pub use traits::{OtpStoreTrait, SmsServiceTrait, SystemTimeSource, TimeSource};
pub use types::{SendCodeResult, SweepResult};

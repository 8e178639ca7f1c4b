//! Business services containing domain logic and use cases.

pub mod kyc;
pub mod otp;

// Re-export commonly used types
pub use kyc::{KycService, KycVerification};
pub use otp::{
    OtpService, OtpServiceConfig, OtpStoreTrait, OtpSweeper, SendCodeResult, SmsServiceTrait,
    SweepResult, SweeperHandle, SystemTimeSource, TimeSource,
};

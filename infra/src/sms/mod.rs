//! SMS Service Module
//!
//! This module provides SMS gateway implementations for delivering OTP codes.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Console output with simulated latency for development
//! - **Twilio Support**: Production SMS via Twilio API (`twilio-sms` feature)
//! - **Gateway Adapter**: Exposes any provider as the core `SmsServiceTrait`

pub mod gateway_adapter;
pub mod mock_sms;
pub mod sms_service;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

pub use gateway_adapter::SmsGatewayAdapter;
pub use mock_sms::MockSmsService;
pub use sms_service::{verification_message, SmsService};

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

use std::time::Duration;

use nxt_shared::config::{SmsConfig, SmsProvider};

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// # Returns
///
/// * `Ok(Box<dyn SmsService>)` - The configured provider
/// * `Err(InfrastructureError::Config)` - Credentials are missing or the
///   provider was not compiled in
pub fn create_sms_service(config: &SmsConfig) -> Result<Box<dyn SmsService>, InfrastructureError> {
    match config.provider {
        SmsProvider::Mock => {
            tracing::info!(
                delay_ms = config.mock_delay_ms,
                "Using mock SMS service"
            );
            Ok(Box::new(MockSmsService::with_delay(Duration::from_millis(
                config.mock_delay_ms,
            ))))
        }
        #[cfg(feature = "twilio-sms")]
        SmsProvider::Twilio => {
            let twilio_config = TwilioConfig::from_sms_config(config)?;
            Ok(Box::new(TwilioSmsService::new(twilio_config)?))
        }
        #[cfg(not(feature = "twilio-sms"))]
        SmsProvider::Twilio => Err(InfrastructureError::Config(
            "SMS_PROVIDER=twilio requires the twilio-sms feature".to_string(),
        )),
    }
}

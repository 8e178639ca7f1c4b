//! SMS Service Interface
//!
//! Defines the trait for SMS service implementations that deliver
//! verification codes.

use async_trait::async_trait;

use crate::InfrastructureError;

/// Body of the SMS carrying a verification code
pub fn verification_message(code: &str) -> String {
    format!(
        "Your NxtBeings verification code is: {}. This code will expire in 5 minutes.",
        code
    )
}

/// SMS service trait for sending text messages
///
/// Implementations include:
/// - Twilio SMS API
/// - Mock implementation for development
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Unique identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Send a verification code via SMS
    ///
    /// Formats the code with [`verification_message`] and sends it.
    async fn send_verification_code(&self, phone_number: &str, code: &str) -> Result<String, InfrastructureError> {
        self.send_sms(phone_number, &verification_message(code)).await
    }

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}

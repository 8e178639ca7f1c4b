//! SMS Gateway Adapter
//!
//! Bridges any infrastructure [`SmsService`] to the core `SmsServiceTrait`
//! consumed by the OTP service.

use async_trait::async_trait;
use nxt_core::services::otp::SmsServiceTrait;

use super::sms_service::SmsService;

/// Adapter that implements the core SmsServiceTrait for a boxed provider
pub struct SmsGatewayAdapter {
    inner: Box<dyn SmsService>,
}

impl SmsGatewayAdapter {
    pub fn new(inner: Box<dyn SmsService>) -> Self {
        Self { inner }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl SmsServiceTrait for SmsGatewayAdapter {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
        self.inner
            .send_verification_code(phone, code)
            .await
            .map_err(|e| e.to_string())
    }
}

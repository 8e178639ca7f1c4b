//! KYC phone verification route handlers
//!
//! - `POST /api/v1/auth/kyc/send-otp`: issue and deliver a code
//! - `POST /api/v1/auth/kyc/verify-otp`: check a code and mark the account verified

pub mod send_otp;
pub mod verify_otp;

use std::sync::Arc;

use nxt_core::repositories::KycAccountRepository;
use nxt_core::services::kyc::KycService;
use nxt_core::services::otp::{OtpStoreTrait, SmsServiceTrait};

pub use send_otp::send_otp;
pub use verify_otp::verify_otp;

/// Application state that holds shared services
pub struct AppState<S, C, R>
where
    S: SmsServiceTrait,
    C: OtpStoreTrait,
    R: KycAccountRepository,
{
    pub kyc_service: Arc<KycService<S, C, R>>,
    /// Reported by the health endpoint
    pub store_backend: String,
    /// Reported by the health endpoint
    pub sms_provider: String,
}

impl<S, C, R> AppState<S, C, R>
where
    S: SmsServiceTrait,
    C: OtpStoreTrait,
    R: KycAccountRepository,
{
    pub fn new(kyc_service: Arc<KycService<S, C, R>>) -> Self {
        Self {
            kyc_service,
            store_backend: "memory".to_string(),
            sms_provider: "mock".to_string(),
        }
    }

    pub fn with_components(mut self, store_backend: impl Into<String>, sms_provider: impl Into<String>) -> Self {
        self.store_backend = store_backend.into();
        self.sms_provider = sms_provider.into();
        self
    }
}

//! Traits for SMS delivery, OTP storage and time integration

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::otp_record::{OtpKey, OtpRecord};
use crate::domain::entities::verification_outcome::VerificationOutcome;

/// Trait for SMS service integration
#[async_trait]
pub trait SmsServiceTrait: Send + Sync {
    /// Send a verification code via SMS, returning the provider message id
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String>;
}

/// Trait for OTP record storage
///
/// Implementations must give per-key mutual exclusion for `put`, `attempt`
/// and `remove_if_expired`; operations on different keys must not block each
/// other.
#[async_trait]
pub trait OtpStoreTrait: Send + Sync {
    /// Insert or overwrite the record for `key`
    async fn put(&self, key: &OtpKey, record: OtpRecord) -> Result<(), String>;

    async fn get(&self, key: &OtpKey) -> Result<Option<OtpRecord>, String>;

    /// Remove the record for `key`; removing a missing key is not an error
    async fn remove(&self, key: &OtpKey) -> Result<(), String>;

    /// Snapshot of every stored entry
    async fn scan(&self) -> Result<Vec<(OtpKey, OtpRecord)>, String>;

    /// Run one verification step atomically.
    ///
    /// Missing key yields `Rejected(NotFound)`. Otherwise applies
    /// [`OtpRecord::attempt`] to the stored record and removes it when the
    /// outcome evicts, all under the key's exclusion.
    async fn attempt(
        &self,
        key: &OtpKey,
        input: &str,
        now: DateTime<Utc>,
        max_attempts: u32,
    ) -> Result<VerificationOutcome, String>;

    /// Remove the record only if the one present at removal time is expired
    async fn remove_if_expired(&self, key: &OtpKey, now: DateTime<Utc>) -> Result<bool, String>;
}

/// Source of the current instant
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

//! Types for OTP service results

use chrono::{DateTime, Utc};

use crate::domain::entities::otp_record::OtpKey;

/// Result of sending a code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// Key the code was stored under
    pub key: OtpKey,
    /// The SMS message ID from the provider
    pub message_id: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Result of one sweep over the store
#[derive(Debug, Default)]
pub struct SweepResult {
    /// Entries seen in the snapshot
    pub scanned: usize,
    /// Expired records actually removed
    pub removed: usize,
    /// Per-key removal failures
    pub errors: Vec<String>,
}

impl SweepResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

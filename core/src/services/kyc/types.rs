//! Types for KYC verification results

use crate::domain::entities::kyc_account::KycAccount;
use crate::domain::entities::verification_outcome::RejectionReason;

/// Result of a KYC verification request
#[derive(Debug, Clone)]
pub enum KycVerification {
    /// Code accepted and the account updated
    Verified(KycAccount),
    /// Code refused; the account was not touched
    Rejected(RejectionReason),
}

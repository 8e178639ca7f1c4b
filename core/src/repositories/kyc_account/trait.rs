//! Repository trait for accounts taking part in phone KYC.
//!
//! Applicants and recruiters live in separate collections, so every lookup
//! is scoped by role.

use async_trait::async_trait;

use crate::domain::entities::kyc_account::KycAccount;
use crate::domain::entities::otp_record::UserRole;
use crate::errors::DomainError;

/// Repository trait for KycAccount persistence operations
#[async_trait]
pub trait KycAccountRepository: Send + Sync {
    /// Find an account of the given role by id
    ///
    /// # Returns
    /// * `Ok(Some(KycAccount))` - Account found
    /// * `Ok(None)` - No account with this id for this role
    /// * `Err(DomainError)` - Storage error
    async fn find_by_id(&self, role: UserRole, id: &str) -> Result<Option<KycAccount>, DomainError>;

    /// Persist changes to an existing account
    ///
    /// # Returns
    /// * `Ok(KycAccount)` - The stored account
    /// * `Err(DomainError::NotFound)` - The account does not exist
    async fn update(&self, account: KycAccount) -> Result<KycAccount, DomainError>;
}

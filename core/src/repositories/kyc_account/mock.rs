//! Mock implementation of KycAccountRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::kyc_account::KycAccount;
use crate::domain::entities::otp_record::UserRole;
use crate::errors::DomainError;

use super::trait_::KycAccountRepository;

/// Mock account repository for testing
pub struct MockKycAccountRepository {
    accounts: RwLock<HashMap<(UserRole, String), KycAccount>>,
    pub should_fail: bool,
}

impl MockKycAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    pub async fn insert(&self, account: KycAccount) {
        self.accounts
            .write()
            .await
            .insert((account.role, account.id.clone()), account);
    }

    pub async fn get(&self, role: UserRole, id: &str) -> Option<KycAccount> {
        self.accounts.read().await.get(&(role, id.to_string())).cloned()
    }
}

#[async_trait]
impl KycAccountRepository for MockKycAccountRepository {
    async fn find_by_id(&self, role: UserRole, id: &str) -> Result<Option<KycAccount>, DomainError> {
        if self.should_fail {
            return Err(DomainError::Internal {
                message: "Repository unavailable".to_string(),
            });
        }
        Ok(self.get(role, id).await)
    }

    async fn update(&self, account: KycAccount) -> Result<KycAccount, DomainError> {
        let mut accounts = self.accounts.write().await;
        let key = (account.role, account.id.clone());

        if !accounts.contains_key(&key) {
            return Err(DomainError::NotFound {
                resource: "Account".to_string(),
            });
        }

        accounts.insert(key, account.clone());
        Ok(account)
    }
}

//! In-memory implementation of the KycAccountRepository trait.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use nxt_core::domain::entities::{KycAccount, UserRole};
use nxt_core::errors::DomainError;
use nxt_core::repositories::KycAccountRepository;

/// Applicant and recruiter accounts keyed by `(role, id)`
#[derive(Default)]
pub struct InMemoryKycAccountRepository {
    accounts: RwLock<HashMap<(UserRole, String), KycAccount>>,
}

impl InMemoryKycAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `accounts`
    pub fn with_accounts(accounts: impl IntoIterator<Item = KycAccount>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| ((account.role, account.id.clone()), account))
            .collect();
        Self {
            accounts: RwLock::new(accounts),
        }
    }

    /// Insert or replace an account
    pub async fn insert(&self, account: KycAccount) {
        self.accounts
            .write()
            .await
            .insert((account.role, account.id.clone()), account);
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl KycAccountRepository for InMemoryKycAccountRepository {
    async fn find_by_id(&self, role: UserRole, id: &str) -> Result<Option<KycAccount>, DomainError> {
        Ok(self
            .accounts
            .read()
            .await
            .get(&(role, id.to_string()))
            .cloned())
    }

    async fn update(&self, account: KycAccount) -> Result<KycAccount, DomainError> {
        let mut accounts = self.accounts.write().await;
        let key = (account.role, account.id.clone());

        match accounts.get_mut(&key) {
            Some(stored) => {
                *stored = account.clone();
                debug!(role = %account.role, account_id = %account.id, "Account updated");
                Ok(account)
            }
            None => Err(DomainError::NotFound {
                resource: "User".to_string(),
            }),
        }
    }
}

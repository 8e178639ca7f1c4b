//! In-memory OTP store backed by `DashMap`
//!
//! A key always lives in one shard of the map, so every operation on one key
//! runs under that shard's lock while keys on other shards proceed in
//! parallel. No lock is ever held across an `.await`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use nxt_core::domain::entities::{OtpKey, OtpRecord, RejectionReason, VerificationOutcome};
use nxt_core::services::otp::OtpStoreTrait;

/// Default number of shards
pub const DEFAULT_SHARDS: usize = 16;

/// Largest shard count the store will allocate
pub const MAX_SHARDS: usize = 1024;

/// Process-local OTP store
pub struct InMemoryOtpStore {
    records: DashMap<OtpKey, OtpRecord>,
    shard_count: usize,
}

impl InMemoryOtpStore {
    /// Create a store with roughly `shards` shards.
    ///
    /// The count is rounded up to a power of two between 2 and [`MAX_SHARDS`].
    pub fn new(shards: usize) -> Self {
        let shard_count = shard_amount(shards);
        Self {
            records: DashMap::with_shard_amount(shard_count),
            shard_count,
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shard_count
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for InMemoryOtpStore {
    fn default() -> Self {
        Self::new(DEFAULT_SHARDS)
    }
}

fn shard_amount(requested: usize) -> usize {
    requested
        .clamp(2, MAX_SHARDS)
        .checked_next_power_of_two()
        .unwrap_or(MAX_SHARDS)
}

#[async_trait]
impl OtpStoreTrait for InMemoryOtpStore {
    async fn put(&self, key: &OtpKey, record: OtpRecord) -> Result<(), String> {
        self.records.insert(key.clone(), record);
        Ok(())
    }

    async fn get(&self, key: &OtpKey) -> Result<Option<OtpRecord>, String> {
        Ok(self.records.get(key).map(|record| record.value().clone()))
    }

    async fn remove(&self, key: &OtpKey) -> Result<(), String> {
        self.records.remove(key);
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<(OtpKey, OtpRecord)>, String> {
        Ok(self
            .records
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }

    async fn attempt(
        &self,
        key: &OtpKey,
        input: &str,
        now: DateTime<Utc>,
        max_attempts: u32,
    ) -> Result<VerificationOutcome, String> {
        // The entry holds the shard write lock; removal goes through it.
        let outcome = match self.records.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                let outcome = entry.get_mut().attempt(input, now, max_attempts);
                if outcome.evicts_record() {
                    entry.remove();
                }
                outcome
            }
            Entry::Vacant(_) => VerificationOutcome::Rejected(RejectionReason::NotFound),
        };
        Ok(outcome)
    }

    async fn remove_if_expired(&self, key: &OtpKey, now: DateTime<Utc>) -> Result<bool, String> {
        Ok(self
            .records
            .remove_if(key, |_, record| record.is_expired_at(now))
            .is_some())
    }
}

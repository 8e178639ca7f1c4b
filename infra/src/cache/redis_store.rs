//! Redis-backed OTP store
//!
//! Each record is a hash at `{prefix}:{role}:{phone}` with the fields
//! `code`, `expires_at` (unix milliseconds) and `attempts`. Writes replace
//! the whole hash in one MULTI block. Verification and conditional removal
//! run as Lua scripts so that every per-key state transition is atomic on
//! the server, even with several service instances sharing one Redis.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use redis::Script;
use std::collections::HashMap;
use tracing::{debug, error};

use nxt_core::domain::entities::{OtpKey, OtpRecord, RejectionReason, UserRole, VerificationOutcome};
use nxt_core::services::otp::OtpStoreTrait;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Redis keeps a record this long past `expires_at`, so a late verify still
/// reports `Expired` rather than `NotFound` until the sweeper reclaims it.
const EXPIRY_GRACE_MS: i64 = 10 * 60 * 1000;

const SCAN_BATCH: usize = 100;

// ARGV: input, now_ms, max_attempts
static ATTEMPT_SCRIPT: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r#"
local h = redis.call('HMGET', KEYS[1], 'code', 'expires_at', 'attempts')
if not h[1] then
  return 'not_found'
end
local now = tonumber(ARGV[2])
local max = tonumber(ARGV[3])
if now > tonumber(h[2]) then
  redis.call('DEL', KEYS[1])
  return 'expired'
end
local attempts = tonumber(h[3])
if attempts >= max then
  redis.call('DEL', KEYS[1])
  return 'too_many_attempts'
end
attempts = attempts + 1
if h[1] == ARGV[1] then
  redis.call('DEL', KEYS[1])
  return 'accepted'
end
if attempts >= max then
  redis.call('DEL', KEYS[1])
  return 'too_many_attempts'
end
redis.call('HSET', KEYS[1], 'attempts', attempts)
return 'invalid'
"#,
    )
});

// ARGV: now_ms
static REMOVE_IF_EXPIRED_SCRIPT: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r#"
local exp = redis.call('HGET', KEYS[1], 'expires_at')
if exp and tonumber(ARGV[1]) > tonumber(exp) then
  redis.call('DEL', KEYS[1])
  return 1
end
return 0
"#,
    )
});

/// OTP store shared through Redis
pub struct RedisOtpStore {
    client: RedisClient,
}

impl RedisOtpStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    fn redis_key(&self, key: &OtpKey) -> String {
        self.client
            .config()
            .make_key(&format!("{}:{}", key.role, key.phone))
    }

    fn parse_key(&self, redis_key: &str) -> Option<OtpKey> {
        let prefix = format!("{}:", self.client.config().key_prefix);
        let rest = redis_key.strip_prefix(&prefix)?;
        let (role, phone) = rest.split_once(':')?;
        let role: UserRole = role.parse().ok()?;
        Some(OtpKey::new(phone, role))
    }

    async fn fetch(&self, redis_key: String) -> Result<Option<OtpRecord>, InfrastructureError> {
        let fields: HashMap<String, String> = self
            .client
            .execute_with_retry(|mut conn| {
                let redis_key = redis_key.clone();
                Box::pin(async move { redis::cmd("HGETALL").arg(redis_key).query_async(&mut conn).await })
            })
            .await?;

        if fields.is_empty() {
            return Ok(None);
        }
        decode_record(&fields).map(Some)
    }
}

fn decode_record(fields: &HashMap<String, String>) -> Result<OtpRecord, InfrastructureError> {
    let field = |name: &str| {
        fields
            .get(name)
            .ok_or_else(|| InfrastructureError::Corrupt(format!("missing field '{}'", name)))
    };

    let expires_ms: i64 = field("expires_at")?
        .parse()
        .map_err(|_| InfrastructureError::Corrupt("expires_at is not a number".to_string()))?;
    let expires_at = Utc
        .timestamp_millis_opt(expires_ms)
        .single()
        .ok_or_else(|| InfrastructureError::Corrupt("expires_at out of range".to_string()))?;
    let attempts: u32 = field("attempts")?
        .parse()
        .map_err(|_| InfrastructureError::Corrupt("attempts is not a number".to_string()))?;

    Ok(OtpRecord {
        code: field("code")?.clone(),
        expires_at,
        attempts,
    })
}

fn decode_outcome(raw: &str) -> Result<VerificationOutcome, InfrastructureError> {
    match raw {
        "accepted" => Ok(VerificationOutcome::Accepted),
        "not_found" => Ok(VerificationOutcome::Rejected(RejectionReason::NotFound)),
        "expired" => Ok(VerificationOutcome::Rejected(RejectionReason::Expired)),
        "too_many_attempts" => Ok(VerificationOutcome::Rejected(RejectionReason::TooManyAttempts)),
        "invalid" => Ok(VerificationOutcome::Rejected(RejectionReason::InvalidCode)),
        other => Err(InfrastructureError::Corrupt(format!(
            "unexpected script result '{}'",
            other
        ))),
    }
}

fn to_store_error(e: InfrastructureError) -> String {
    error!(error = %e, "Redis OTP store operation failed");
    e.to_string()
}

#[async_trait]
impl OtpStoreTrait for RedisOtpStore {
    async fn put(&self, key: &OtpKey, record: OtpRecord) -> Result<(), String> {
        let redis_key = self.redis_key(key);
        let expires_ms = record.expires_at.timestamp_millis();

        self.client
            .execute_with_retry(|mut conn| {
                let redis_key = redis_key.clone();
                let code = record.code.clone();
                let attempts = record.attempts;
                Box::pin(async move {
                    redis::pipe()
                        .atomic()
                        .cmd("DEL")
                        .arg(&redis_key)
                        .ignore()
                        .cmd("HSET")
                        .arg(&redis_key)
                        .arg("code")
                        .arg(code)
                        .arg("expires_at")
                        .arg(expires_ms)
                        .arg("attempts")
                        .arg(attempts)
                        .ignore()
                        .cmd("PEXPIREAT")
                        .arg(&redis_key)
                        .arg(expires_ms + EXPIRY_GRACE_MS)
                        .ignore()
                        .query_async::<_, ()>(&mut conn)
                        .await
                })
            })
            .await
            .map_err(|e| to_store_error(e.into()))?;

        debug!(key = %key.role, "Stored OTP record in Redis");
        Ok(())
    }

    async fn get(&self, key: &OtpKey) -> Result<Option<OtpRecord>, String> {
        self.fetch(self.redis_key(key)).await.map_err(to_store_error)
    }

    async fn remove(&self, key: &OtpKey) -> Result<(), String> {
        let redis_key = self.redis_key(key);
        self.client
            .execute_with_retry(|mut conn| {
                let redis_key = redis_key.clone();
                Box::pin(async move { redis::cmd("DEL").arg(redis_key).query_async::<_, ()>(&mut conn).await })
            })
            .await
            .map_err(|e| to_store_error(e.into()))
    }

    async fn scan(&self) -> Result<Vec<(OtpKey, OtpRecord)>, String> {
        let pattern = self.client.config().make_key("*");
        let mut cursor: u64 = 0;
        let mut redis_keys = Vec::new();

        loop {
            let (next, batch): (u64, Vec<String>) = self
                .client
                .execute_with_retry(|mut conn| {
                    let pattern = pattern.clone();
                    Box::pin(async move {
                        redis::cmd("SCAN")
                            .arg(cursor)
                            .arg("MATCH")
                            .arg(pattern)
                            .arg("COUNT")
                            .arg(SCAN_BATCH)
                            .query_async(&mut conn)
                            .await
                    })
                })
                .await
                .map_err(|e| to_store_error(e.into()))?;

            redis_keys.extend(batch);
            cursor = next;
            if cursor == 0 {
                break;
            }
        }

        let mut entries = Vec::with_capacity(redis_keys.len());
        for redis_key in redis_keys {
            let Some(key) = self.parse_key(&redis_key) else {
                continue;
            };
            // Removed between SCAN and HGETALL
            if let Some(record) = self.fetch(redis_key).await.map_err(to_store_error)? {
                entries.push((key, record));
            }
        }
        Ok(entries)
    }

    async fn attempt(
        &self,
        key: &OtpKey,
        input: &str,
        now: DateTime<Utc>,
        max_attempts: u32,
    ) -> Result<VerificationOutcome, String> {
        // Not retried: a lost reply may hide an attempt that was counted.
        let mut conn = self.client.connection();
        let raw: String = ATTEMPT_SCRIPT
            .key(self.redis_key(key))
            .arg(input)
            .arg(now.timestamp_millis())
            .arg(max_attempts)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| to_store_error(e.into()))?;

        decode_outcome(&raw).map_err(to_store_error)
    }

    async fn remove_if_expired(&self, key: &OtpKey, now: DateTime<Utc>) -> Result<bool, String> {
        let mut conn = self.client.connection();
        let removed: i64 = REMOVE_IF_EXPIRED_SCRIPT
            .key(self.redis_key(key))
            .arg(now.timestamp_millis())
            .invoke_async(&mut conn)
            .await
            .map_err(|e| to_store_error(e.into()))?;
        Ok(removed == 1)
    }
}

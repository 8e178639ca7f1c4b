//! OTP lifecycle configuration

use serde::{Deserialize, Serialize};

use super::parse_or;

/// Longest code lifetime accepted from configuration (one day)
pub const MAX_EXPIRATION_MINUTES: i64 = 24 * 60;

/// Longest sweep period accepted from configuration (one day)
pub const MAX_SWEEP_INTERVAL_SECONDS: u64 = 24 * 60 * 60;

/// Longest SMS dispatch bound accepted from configuration
pub const MAX_DELIVERY_TIMEOUT_SECONDS: u64 = 300;

/// Largest shard count accepted from configuration
pub const MAX_STORE_SHARDS: usize = 1024;

/// Where OTP records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OtpStoreBackend {
    /// In-process concurrent map
    #[default]
    Memory,
    /// Redis, shared across instances
    Redis,
}

impl std::str::FromStr for OtpStoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => Ok(OtpStoreBackend::Memory),
            "redis" => Ok(OtpStoreBackend::Redis),
            _ => Err(format!("Invalid OTP store backend: {}", s)),
        }
    }
}

/// OTP generation, verification and housekeeping settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes a code stays valid after it is sent
    pub expiration_minutes: i64,

    /// Verification attempts allowed per code
    pub max_attempts: u32,

    /// Seconds between sweeps of expired records
    pub sweep_interval_seconds: u64,

    /// Upper bound on a single SMS dispatch
    pub delivery_timeout_seconds: u64,

    /// Number of shards in the in-memory store
    pub store_shards: usize,

    /// Store backend
    #[serde(default)]
    pub store_backend: OtpStoreBackend,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiration_minutes: 5,
            max_attempts: 3,
            sweep_interval_seconds: 300,
            delivery_timeout_seconds: 10,
            store_shards: 16,
            store_backend: OtpStoreBackend::Memory,
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_source(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_source<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            expiration_minutes: parse_or(lookup, "OTP_EXPIRATION_MINUTES", defaults.expiration_minutes)
                .clamp(1, MAX_EXPIRATION_MINUTES),
            max_attempts: parse_or(lookup, "OTP_MAX_ATTEMPTS", defaults.max_attempts).max(1),
            sweep_interval_seconds: parse_or(
                lookup,
                "OTP_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            )
            .clamp(1, MAX_SWEEP_INTERVAL_SECONDS),
            delivery_timeout_seconds: parse_or(
                lookup,
                "OTP_DELIVERY_TIMEOUT_SECONDS",
                defaults.delivery_timeout_seconds,
            )
            .clamp(1, MAX_DELIVERY_TIMEOUT_SECONDS),
            store_shards: parse_or(lookup, "OTP_STORE_SHARDS", defaults.store_shards)
                .clamp(1, MAX_STORE_SHARDS),
            store_backend: parse_or(lookup, "OTP_STORE_BACKEND", defaults.store_backend),
        }
    }
}

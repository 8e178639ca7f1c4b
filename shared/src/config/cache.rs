//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::parse_or;

/// Redis configuration for the shared OTP store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Attempts made when establishing the initial connection
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    /// Prefix for every OTP key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            connect_retries: default_connect_retries(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl CacheConfig {
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
            url: lookup("REDIS_URL").unwrap_or(defaults.url),
            connection_timeout: parse_or(lookup, "REDIS_CONNECTION_TIMEOUT", defaults.connection_timeout),
            connect_retries: parse_or(lookup, "REDIS_CONNECT_RETRIES", defaults.connect_retries),
            key_prefix: lookup("REDIS_KEY_PREFIX").unwrap_or(defaults.key_prefix),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }
}

fn default_connect_retries() -> u32 {
    3
}

fn default_key_prefix() -> String {
    String::from("otp")
}

//! Configuration module with business-specific sub-modules
//!
//! Configuration is environment driven. Every sub-config exposes a
//! `from_env()` constructor that falls back to defaults for unset or
//! unparsable variables, and a `from_source()` variant taking a lookup
//! function so the parsing can be exercised without touching the process
//! environment.
//!
//! - `cache` - Redis connection for the shared OTP store
//! - `environment` - Environment detection and logging configuration
//! - `otp` - OTP lifetime, attempt budget, sweeper and store backend
//! - `server` - HTTP server and CORS configuration
//! - `sms` - SMS provider selection and credentials

pub mod cache;
pub mod environment;
pub mod otp;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::{OtpConfig, OtpStoreBackend};
pub use server::{CorsConfig, ServerConfig};
pub use sms::{SmsConfig, SmsProvider};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// OTP lifecycle configuration
    pub otp: OtpConfig,

    /// Redis configuration (used when the OTP store backend is redis)
    pub cache: CacheConfig,

    /// SMS gateway configuration
    pub sms: SmsConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            otp: OtpConfig::default(),
            cache: CacheConfig::default(),
            sms: SmsConfig::default(),
            cors: CorsConfig::for_environment(env),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_source(&lookup);
        Self {
            environment,
            server: ServerConfig::from_source(&lookup),
            otp: OtpConfig::from_source(&lookup),
            cache: CacheConfig::from_source(&lookup),
            sms: SmsConfig::from_source(&lookup),
            cors: CorsConfig::from_source(environment, &lookup),
            logging: LoggingConfig::from_source(environment, &lookup),
        }
    }
}

/// Parse a variable, falling back to `default` when unset or malformed
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
pub(crate) fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

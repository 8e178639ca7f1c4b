//! Configuration for the OTP service

use std::time::Duration;

use nxt_shared::OtpConfig;

use crate::domain::entities::otp_record::{DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of minutes before a code expires
    pub code_expiration_minutes: i64,
    /// Maximum number of verification attempts per code
    pub max_attempts: u32,
    /// Upper bound on a single gateway dispatch
    pub delivery_timeout: Duration,
    /// Period of the background sweeper
    pub sweep_interval: Duration,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            delivery_timeout: Duration::from_secs(10),
            sweep_interval: Duration::from_secs(300),
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_expiration_minutes: config.expiration_minutes,
            max_attempts: config.max_attempts,
            delivery_timeout: Duration::from_secs(config.delivery_timeout_seconds),
            sweep_interval: Duration::from_secs(config.sweep_interval_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_domain_constants() {
        let config = OtpServiceConfig::default();
        assert_eq!(config.code_expiration_minutes, 5);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.delivery_timeout, Duration::from_secs(10));
        assert_eq!(config.sweep_interval, Duration::from_secs(300));
    }

    #[test]
    fn test_from_shared_config() {
        let shared = OtpConfig {
            expiration_minutes: 2,
            max_attempts: 5,
            sweep_interval_seconds: 30,
            delivery_timeout_seconds: 3,
            ..OtpConfig::default()
        };
        let config = OtpServiceConfig::from(&shared);
        assert_eq!(config.code_expiration_minutes, 2);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.sweep_interval, Duration::from_secs(30));
        assert_eq!(config.delivery_timeout, Duration::from_secs(3));
    }
}

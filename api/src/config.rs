//! Runtime configuration for the API binary

use nxt_core::services::otp::OtpServiceConfig;
use nxt_shared::config::AppConfig;

/// Load `.env` (if present) and read the application configuration
pub fn load() -> AppConfig {
    dotenvy::dotenv().ok();
    AppConfig::from_env()
}

/// OTP service settings derived from the application configuration
pub fn otp_service_config(config: &AppConfig) -> OtpServiceConfig {
    OtpServiceConfig::from(&config.otp)
}

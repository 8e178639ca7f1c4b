//! Shared utilities and common types for the NxtBeings server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response structures
//! - Phone number helpers (masking, normalization, length checks)
//! - Health check response types

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CorsConfig, Environment, LogFormat, LoggingConfig, OtpConfig,
    OtpStoreBackend, ServerConfig, SmsConfig, SmsProvider,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::HealthResponse;
pub use utils::phone;

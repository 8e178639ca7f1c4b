//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `nxt_core`:
//!
//! - **Cache**: the `DashMap` in-memory OTP store and the Redis-backed store
//! - **SMS**: SMS gateway integrations (mock, Twilio) and the adapter that
//!   exposes them to the OTP service
//! - **Repositories**: in-memory KYC account storage
//!
//! ## Features
//!
//! - `redis-cache`: Enable the Redis OTP store (default)
//! - `twilio-sms`: Enable the Twilio SMS gateway

/// Cache module - OTP record stores
pub mod cache;

/// Repositories module - account storage
pub mod repositories;

/// SMS service module - External SMS providers
pub mod sms;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Stored data could not be interpreted
    #[error("Corrupt stored data: {0}")]
    Corrupt(String),
}

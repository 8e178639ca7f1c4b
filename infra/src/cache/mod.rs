//! Cache module - OTP record stores
//!
//! - [`InMemoryOtpStore`]: process-local `DashMap` store (default)
//! - [`RedisOtpStore`]: Redis-backed store shared by every instance
//!   (`redis-cache` feature)

pub mod memory_store;

#[cfg(feature = "redis-cache")]
pub mod redis_client;
#[cfg(feature = "redis-cache")]
pub mod redis_store;

pub use memory_store::InMemoryOtpStore;

#[cfg(feature = "redis-cache")]
pub use redis_client::RedisClient;
#[cfg(feature = "redis-cache")]
pub use redis_store::RedisOtpStore;

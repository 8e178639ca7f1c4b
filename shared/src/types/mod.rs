//! Type definitions shared by the API and service layers

pub mod response;

pub use response::{HealthResponse, HealthStatus, ServiceHealth};

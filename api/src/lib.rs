//! # NxtBeings API
//!
//! Actix-web surface for phone KYC: request an OTP, verify it, and mark the
//! applicant or recruiter account as phone verified.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

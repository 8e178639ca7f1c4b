//! Account repositories
//!
//! Accounts are owned by the wider marketplace; this service only reads them
//! and records phone verification. The in-memory implementation backs the
//! standalone binary and integration tests.

pub mod memory_kyc_account;

pub use memory_kyc_account::InMemoryKycAccountRepository;

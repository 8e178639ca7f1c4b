//! Repository interfaces for data access abstraction.

pub mod kyc_account;

pub use kyc_account::KycAccountRepository;

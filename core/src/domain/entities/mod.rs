//! Domain entities representing core business objects.

pub mod kyc_account;
pub mod otp_record;
pub mod verification_outcome;

pub use kyc_account::KycAccount;
pub use otp_record::{OtpKey, OtpRecord, UserRole, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};
pub use verification_outcome::{RejectionReason, VerificationOutcome};

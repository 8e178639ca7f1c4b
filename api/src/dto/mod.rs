//! Request and response bodies

pub mod error;
pub mod kyc;

pub use error::ErrorResponseExt;
pub use kyc::{KycAccountDto, SendOtpRequest, SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse};
pub use nxt_shared::errors::ErrorResponse;

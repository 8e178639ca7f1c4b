use actix_web::{web, HttpResponse};
use validator::Validate;

use nxt_core::repositories::KycAccountRepository;
use nxt_core::services::kyc::KycVerification;
use nxt_core::services::otp::{OtpStoreTrait, SmsServiceTrait};

use crate::dto::kyc::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::error::{handle_domain_error, rejection_response, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/auth/kyc/verify-otp
///
/// Verifies the code sent to a phone number and, when accepted, records the
/// phone on the account and marks it KYC verified.
///
/// # Request Body
///
/// ```json
/// {
///     "phone": "+15551234567",
///     "userType": "applicant",
///     "otp": "123456",
///     "userId": "64f1c2..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid request, unknown/expired/wrong code
/// - 404 Not Found: The code was accepted but the account does not exist
/// - 429 Too Many Requests: Attempt budget exhausted
/// - 500 Internal Server Error: Store or repository failure
pub async fn verify_otp<S, C, R>(
    state: web::Data<AppState<S, C, R>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    S: SmsServiceTrait + 'static,
    C: OtpStoreTrait + 'static,
    R: KycAccountRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let result = state
        .kyc_service
        .verify_otp(&request.phone, &request.user_type, &request.otp, &request.user_id)
        .await;

    match result {
        Ok(KycVerification::Verified(account)) => HttpResponse::Ok().json(VerifyOtpResponse {
            message: "KYC verification completed successfully".to_string(),
            phone: request.phone.trim().to_string(),
            user_type: account.role,
            user: account.into(),
        }),
        Ok(KycVerification::Rejected(reason)) => rejection_response(reason),
        Err(error) => handle_domain_error(error),
    }
}

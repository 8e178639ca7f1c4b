use actix_web::{web, HttpResponse};
use validator::Validate;

use nxt_core::repositories::KycAccountRepository;
use nxt_core::services::otp::{OtpStoreTrait, SmsServiceTrait};
use nxt_shared::phone::mask_phone_number;

use crate::dto::kyc::{SendOtpRequest, SendOtpResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/auth/kyc/send-otp
///
/// Issues a new code for the (phone, userType) pair, replacing any pending
/// one, and hands it to the SMS gateway.
///
/// # Request Body
///
/// ```json
/// {
///     "phone": "+15551234567",
///     "userType": "applicant"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "OTP sent successfully for KYC verification",
///     "phone": "+15551234567",
///     "userType": "applicant",
///     "expiresAt": "2025-01-01T10:05:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid phone or user type
/// - 503 Service Unavailable: The SMS gateway failed or timed out
/// - 500 Internal Server Error: The OTP store is unreachable
pub async fn send_otp<S, C, R>(
    state: web::Data<AppState<S, C, R>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    S: SmsServiceTrait + 'static,
    C: OtpStoreTrait + 'static,
    R: KycAccountRepository + 'static,
{
    if let Err(errors) = request.validate() {
        tracing::debug!(errors = ?errors.field_errors().keys(), "Invalid send-otp request");
        return validation_error_response(&errors);
    }

    match state
        .kyc_service
        .request_otp(&request.phone, &request.user_type)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(SendOtpResponse {
            message: "OTP sent successfully for KYC verification".to_string(),
            phone: result.key.phone,
            user_type: result.key.role,
            expires_at: result.expires_at,
        }),
        Err(error) => {
            tracing::warn!(
                phone = %mask_phone_number(request.phone.trim()),
                error = %error,
                "send-otp failed"
            );
            handle_domain_error(error)
        }
    }
}

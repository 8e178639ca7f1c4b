//! Mapping of domain errors and verification rejections to HTTP responses

use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use validator::ValidationErrors;

use nxt_core::domain::entities::RejectionReason;
use nxt_core::errors::{DomainError, OtpError};
use nxt_shared::errors::{error_codes, ErrorResponse};

use crate::dto::ErrorResponseExt;

const INVALID_REQUEST_MESSAGE: &str = "Invalid request data";

/// HTTP status for a rejected verification
pub fn rejection_status(reason: RejectionReason) -> StatusCode {
    match reason {
        RejectionReason::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
        RejectionReason::NotFound | RejectionReason::Expired | RejectionReason::InvalidCode => {
            StatusCode::BAD_REQUEST
        }
    }
}

/// Response for a rejected verification: the reason's code and message
pub fn rejection_response(reason: RejectionReason) -> HttpResponse {
    ErrorResponse::new(reason.code(), reason.message()).to_response(rejection_status(reason))
}

/// 400 `validation_error` listing the messages for each offending field
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut details = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(camel_case(field), serde_json::json!(messages));
    }

    ErrorResponse::with_details(error_codes::VALIDATION_ERROR, INVALID_REQUEST_MESSAGE, details)
        .to_response(StatusCode::BAD_REQUEST)
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::ValidationErr(validation) => {
            tracing::debug!(error = %validation, "Request rejected by validation");
            let field = camel_case(validation.field());
            ErrorResponse::new(error_codes::VALIDATION_ERROR, INVALID_REQUEST_MESSAGE)
                .add_detail(field, vec![validation.to_string()])
                .to_response(StatusCode::BAD_REQUEST)
        }
        DomainError::NotFound { resource } => {
            let (code, message) = if resource == "User" {
                (error_codes::USER_NOT_FOUND, "User not found".to_string())
            } else {
                (error_codes::NOT_FOUND, format!("{} not found", resource))
            };
            ErrorResponse::new(code, message).to_response(StatusCode::NOT_FOUND)
        }
        DomainError::Otp(OtpError::DeliveryFailed { .. }) => ErrorResponse::new(
            error_codes::SMS_SERVICE_FAILURE,
            "Failed to send OTP. Please try again later",
        )
        .to_response(StatusCode::SERVICE_UNAVAILABLE),
        DomainError::Internal { message } => {
            tracing::error!(error = %message, "Internal error while handling request");
            ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use nxt_core::errors::ValidationError;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_rejection_status() {
        assert_eq!(rejection_status(RejectionReason::NotFound), StatusCode::BAD_REQUEST);
        assert_eq!(rejection_status(RejectionReason::Expired), StatusCode::BAD_REQUEST);
        assert_eq!(rejection_status(RejectionReason::InvalidCode), StatusCode::BAD_REQUEST);
        assert_eq!(
            rejection_status(RejectionReason::TooManyAttempts),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[actix_rt::test]
    async fn test_rejection_body() {
        let response = rejection_response(RejectionReason::Expired);
        let json = body_json(response).await;
        assert_eq!(json["error"], "otp_expired");
        assert_eq!(json["message"], "OTP has expired");
    }

    #[actix_rt::test]
    async fn test_delivery_failure_is_503() {
        let error = DomainError::Otp(OtpError::DeliveryFailed {
            reason: "gateway down".to_string(),
        });
        let response = handle_domain_error(error);
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["error"], "sms_service_failure");
    }

    #[actix_rt::test]
    async fn test_missing_user_is_404() {
        let response = handle_domain_error(DomainError::NotFound {
            resource: "User".to_string(),
        });
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "user_not_found");
    }

    #[actix_rt::test]
    async fn test_validation_error_names_field() {
        let response = handle_domain_error(ValidationError::UnknownRole {
            value: "admin".to_string(),
        }
        .into());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "validation_error");
        assert!(json["details"]["userType"].is_array());
    }

    #[actix_rt::test]
    async fn test_internal_error_hides_message() {
        let response = handle_domain_error(DomainError::Internal {
            message: "redis connection refused".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["message"], "An internal error occurred");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("user_type"), "userType");
        assert_eq!(camel_case("phone"), "phone");
    }
}

//! Health check endpoint

use std::collections::HashMap;

use actix_web::{web, HttpResponse};

use nxt_core::repositories::KycAccountRepository;
use nxt_core::services::otp::{OtpStoreTrait, SmsServiceTrait};
use nxt_shared::types::{HealthResponse, ServiceHealth};
use nxt_shared::types::response::HealthStatus;

use crate::routes::kyc::AppState;

/// Handler for GET /health
pub async fn health_check<S, C, R>(state: web::Data<AppState<S, C, R>>) -> HttpResponse
where
    S: SmsServiceTrait + 'static,
    C: OtpStoreTrait + 'static,
    R: KycAccountRepository + 'static,
{
    let mut services = HashMap::new();
    services.insert(
        "otp_store".to_string(),
        ServiceHealth::with_status(HealthStatus::Healthy, state.store_backend.clone()),
    );
    services.insert(
        "sms_gateway".to_string(),
        ServiceHealth::with_status(HealthStatus::Healthy, state.sms_provider.clone()),
    );

    HttpResponse::Ok().json(HealthResponse::from_services(
        services,
        env!("CARGO_PKG_VERSION"),
    ))
}

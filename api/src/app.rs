//! Application factory
//!
//! Builds the Actix-web application around an already wired `AppState`, so
//! the binary and the HTTP tests share one route table.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{error, web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use nxt_core::repositories::KycAccountRepository;
use nxt_core::services::otp::{OtpStoreTrait, SmsServiceTrait};
use nxt_shared::config::CorsConfig;
use nxt_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::create_cors;
use crate::routes::health::health_check;
use crate::routes::kyc::{send_otp, verify_otp, AppState};

/// Register the API routes on a service config
pub fn configure<S, C, R>(cfg: &mut web::ServiceConfig)
where
    S: SmsServiceTrait + 'static,
    C: OtpStoreTrait + 'static,
    R: KycAccountRepository + 'static,
{
    cfg.route("/health", web::get().to(health_check::<S, C, R>))
        .service(
            web::scope("/api/v1/auth/kyc")
                .route("/send-otp", web::post().to(send_otp::<S, C, R>))
                .route("/verify-otp", web::post().to(verify_otp::<S, C, R>)),
        );
}

/// Malformed JSON bodies get the same shape as validation failures
pub fn json_config(max_payload_size: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::VALIDATION_ERROR,
                format!("Invalid JSON body: {}", err),
            ));
            error::InternalError::from_response(err, response).into()
        })
}

/// Create and configure the application with all dependencies
pub fn create_app<S, C, R>(
    app_state: web::Data<AppState<S, C, R>>,
    cors: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: SmsServiceTrait + 'static,
    C: OtpStoreTrait + 'static,
    R: KycAccountRepository + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(json_config(max_payload_size))
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .configure(configure::<S, C, R>)
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}

//! HTTP tests for the KYC OTP endpoints
//!
//! The app is built with the same factory as the binary, over the in-memory
//! store, the mock SMS gateway and an in-memory account repository.

use std::sync::{Arc, Mutex};

use actix_web::{http::StatusCode, test, web};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use nxt_api::app::create_app;
use nxt_api::routes::kyc::AppState;
use nxt_core::domain::entities::{KycAccount, OtpKey, UserRole};
use nxt_core::repositories::KycAccountRepository;
use nxt_core::services::kyc::KycService;
use nxt_core::services::otp::{OtpService, OtpServiceConfig, OtpStoreTrait, TimeSource};
use nxt_infra::cache::InMemoryOtpStore;
use nxt_infra::repositories::InMemoryKycAccountRepository;
use nxt_infra::sms::{MockSmsService, SmsGatewayAdapter};
use nxt_shared::config::CorsConfig;

const PHONE: &str = "+15551234567";

struct TestClock(Mutex<DateTime<Utc>>);

impl TestClock {
    fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now = *now + by;
    }
}

impl TimeSource for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

type State = AppState<SmsGatewayAdapter, InMemoryOtpStore, InMemoryKycAccountRepository>;

struct Harness {
    state: web::Data<State>,
    store: Arc<InMemoryOtpStore>,
    accounts: Arc<InMemoryKycAccountRepository>,
    clock: Arc<TestClock>,
}

fn harness(gateway_fails: bool) -> Harness {
    let store = Arc::new(InMemoryOtpStore::default());
    let accounts = Arc::new(InMemoryKycAccountRepository::with_accounts([
        KycAccount::new("app-1", UserRole::Applicant, "Grace", "Hopper", "grace@example.com"),
        KycAccount::new("rec-1", UserRole::Recruiter, "Alan", "Turing", "alan@example.com"),
    ]));
    let clock = Arc::new(TestClock(Mutex::new(Utc::now())));
    let gateway = SmsGatewayAdapter::new(Box::new(MockSmsService::with_options(false, gateway_fails)));
    let otp = Arc::new(OtpService::with_time_source(
        Arc::new(gateway),
        store.clone(),
        OtpServiceConfig::default(),
        clock.clone(),
    ));
    let kyc = Arc::new(KycService::new(otp, accounts.clone()));

    Harness {
        state: web::Data::new(AppState::new(kyc)),
        store,
        accounts,
        clock,
    }
}

async fn stored_code(store: &InMemoryOtpStore, role: UserRole) -> String {
    store
        .get(&OtpKey::new(PHONE, role))
        .await
        .unwrap()
        .expect("a code should be stored")
        .code
}

fn wrong_code(code: &str) -> &'static str {
    if code == "000000" {
        "111111"
    } else {
        "000000"
    }
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(create_app($state.clone(), &CorsConfig::development(), 64 * 1024)).await
    };
}

#[actix_rt::test]
async fn test_health() {
    let h = harness(false);
    let app = app!(h.state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["services"]["otp_store"].is_object());
}

#[actix_rt::test]
async fn test_send_then_verify_marks_account() {
    let h = harness(false);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/kyc/send-otp")
        .set_json(json!({ "phone": PHONE, "userType": "applicant" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "OTP sent successfully for KYC verification");
    assert_eq!(body["userType"], "applicant");

    let code = stored_code(&h.store, UserRole::Applicant).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/kyc/verify-otp")
        .set_json(json!({ "phone": PHONE, "userType": "applicant", "otp": code, "userId": "app-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "KYC verification completed successfully");
    assert_eq!(body["user"]["phoneVerified"], true);
    assert_eq!(body["user"]["isKYCVerified"], true);
    assert_eq!(body["user"]["phone"], PHONE);

    let account = h
        .accounts
        .find_by_id(UserRole::Applicant, "app-1")
        .await
        .unwrap()
        .unwrap();
    assert!(account.is_kyc_verified);

    // Replay
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/kyc/verify-otp")
        .set_json(json!({ "phone": PHONE, "userType": "applicant", "otp": code, "userId": "app-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "otp_not_found");
}

#[actix_rt::test]
async fn test_send_validation_errors() {
    let h = harness(false);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/kyc/send-otp")
        .set_json(json!({ "phone": "12345", "userType": "admin" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"]["phone"].is_array());
    assert!(body["details"]["userType"].is_array());
    assert!(h.store.is_empty());
}

#[actix_rt::test]
async fn test_malformed_json() {
    let h = harness(false);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/kyc/send-otp")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
}

#[actix_rt::test]
async fn test_delivery_failure_is_503_and_code_survives() {
    let h = harness(true);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/kyc/send-otp")
        .set_json(json!({ "phone": PHONE, "userType": "recruiter" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "sms_service_failure");

    assert_eq!(stored_code(&h.store, UserRole::Recruiter).await.len(), 6);
}

#[actix_rt::test]
async fn test_three_wrong_codes_then_429() {
    let h = harness(false);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/kyc/send-otp")
        .set_json(json!({ "phone": PHONE, "userType": "applicant" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let code = stored_code(&h.store, UserRole::Applicant).await;
    let wrong = wrong_code(&code);

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/kyc/verify-otp")
            .set_json(json!({ "phone": PHONE, "userType": "applicant", "otp": wrong, "userId": "app-1" }))
            .to_request();
        statuses.push(test::call_service(&app, req).await.status());
    }
    assert_eq!(
        statuses,
        vec![
            StatusCode::BAD_REQUEST,
            StatusCode::BAD_REQUEST,
            StatusCode::TOO_MANY_REQUESTS
        ]
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/kyc/verify-otp")
        .set_json(json!({ "phone": PHONE, "userType": "applicant", "otp": code, "userId": "app-1" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["error"], "otp_not_found");
}

#[actix_rt::test]
async fn test_expired_code() {
    let h = harness(false);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/kyc/send-otp")
        .set_json(json!({ "phone": PHONE, "userType": "applicant" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let code = stored_code(&h.store, UserRole::Applicant).await;

    h.clock.advance(Duration::minutes(6));

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/kyc/verify-otp")
        .set_json(json!({ "phone": PHONE, "userType": "applicant", "otp": code, "userId": "app-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "otp_expired");
    assert_eq!(body["message"], "OTP has expired");
}

#[actix_rt::test]
async fn test_unknown_account_is_404() {
    let h = harness(false);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/kyc/send-otp")
        .set_json(json!({ "phone": PHONE, "userType": "recruiter" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let code = stored_code(&h.store, UserRole::Recruiter).await;

    // app-1 is an applicant, not a recruiter
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/kyc/verify-otp")
        .set_json(json!({ "phone": PHONE, "userType": "recruiter", "otp": code, "userId": "app-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "user_not_found");
}

#[actix_rt::test]
async fn test_unknown_route() {
    let h = harness(false);
    let app = app!(h.state);

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

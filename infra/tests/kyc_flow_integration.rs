//! KYC verification over the in-memory account repository

use std::sync::Arc;

use nxt_core::domain::entities::{KycAccount, OtpKey, RejectionReason, UserRole};
use nxt_core::services::kyc::{KycService, KycVerification};
use nxt_core::services::otp::{OtpService, OtpServiceConfig, OtpStoreTrait};
use nxt_core::repositories::KycAccountRepository;
use nxt_core::errors::DomainError;
use nxt_infra::cache::InMemoryOtpStore;
use nxt_infra::repositories::InMemoryKycAccountRepository;
use nxt_infra::sms::{MockSmsService, SmsGatewayAdapter};

struct Fixture {
    store: Arc<InMemoryOtpStore>,
    accounts: Arc<InMemoryKycAccountRepository>,
    kyc: KycService<SmsGatewayAdapter, InMemoryOtpStore, InMemoryKycAccountRepository>,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryOtpStore::default());
    let accounts = Arc::new(InMemoryKycAccountRepository::with_accounts([
        KycAccount::new("app-1", UserRole::Applicant, "Grace", "Hopper", "grace@example.com"),
        KycAccount::new("rec-1", UserRole::Recruiter, "Alan", "Turing", "alan@example.com"),
    ]));
    let gateway = SmsGatewayAdapter::new(Box::new(MockSmsService::with_options(false, false)));
    let otp = Arc::new(OtpService::new(
        Arc::new(gateway),
        store.clone(),
        OtpServiceConfig::default(),
    ));

    Fixture {
        store,
        accounts: accounts.clone(),
        kyc: KycService::new(otp, accounts),
    }
}

async fn code_for(store: &InMemoryOtpStore, phone: &str, role: UserRole) -> String {
    store.get(&OtpKey::new(phone, role)).await.unwrap().unwrap().code
}

#[tokio::test]
async fn test_applicant_verification_marks_account() {
    let f = fixture();
    f.kyc.request_otp(" +15551234567 ", "applicant").await.unwrap();

    let code = code_for(&f.store, "+15551234567", UserRole::Applicant).await;
    let result = f
        .kyc
        .verify_otp("+15551234567", "applicant", &code, "app-1")
        .await
        .unwrap();

    match result {
        KycVerification::Verified(account) => {
            assert!(account.phone_verified);
            assert!(account.is_kyc_verified);
            assert_eq!(account.phone.as_deref(), Some("+15551234567"));
        }
        other => panic!("expected verification, got {:?}", other),
    }

    let stored = f.accounts.find_by_id(UserRole::Applicant, "app-1").await.unwrap().unwrap();
    assert!(stored.is_kyc_verified);
}

#[tokio::test]
async fn test_recruiter_code_does_not_verify_applicant() {
    let f = fixture();
    f.kyc.request_otp("+15551234567", "recruiter").await.unwrap();
    let code = code_for(&f.store, "+15551234567", UserRole::Recruiter).await;

    let result = f
        .kyc
        .verify_otp("+15551234567", "applicant", &code, "app-1")
        .await
        .unwrap();
    assert!(matches!(result, KycVerification::Rejected(RejectionReason::NotFound)));
}

#[tokio::test]
async fn test_unknown_account_after_valid_code() {
    let f = fixture();
    f.kyc.request_otp("+15551234567", "applicant").await.unwrap();
    let code = code_for(&f.store, "+15551234567", UserRole::Applicant).await;

    let result = f
        .kyc
        .verify_otp("+15551234567", "applicant", &code, "nobody")
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));

    // Consumed
    let retry = f
        .kyc
        .verify_otp("+15551234567", "applicant", &code, "app-1")
        .await
        .unwrap();
    assert!(matches!(retry, KycVerification::Rejected(RejectionReason::NotFound)));
}

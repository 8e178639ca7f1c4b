//! Tests for the mock SMS gateway and the core adapter

use std::time::Duration;

use nxt_core::services::otp::SmsServiceTrait;

use crate::sms::{MockSmsService, SmsGatewayAdapter, SmsService};

#[tokio::test]
async fn test_mock_send_sms_success() {
    let service = MockSmsService::with_options(false, false);

    let message_id = service.send_sms("9876543210", "hello").await.unwrap();
    assert!(message_id.starts_with("mock_"));
    assert_eq!(service.get_message_count(), 1);
}

#[tokio::test]
async fn test_mock_accepts_numbers_without_country_code() {
    let service = MockSmsService::with_options(false, false);
    assert!(service.send_verification_code("5551234567", "123456").await.is_ok());
}

#[tokio::test]
async fn test_mock_simulated_failure() {
    let service = MockSmsService::with_options(false, true);

    let result = service.send_sms("+15551234567", "hello").await;
    assert!(result.is_err());
    assert_eq!(service.get_message_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_mock_delay_is_applied() {
    let service = MockSmsService::with_delay(Duration::from_millis(1000));
    let started = tokio::time::Instant::now();

    service.send_sms("+15551234567", "hello").await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(1000));
}

#[tokio::test]
async fn test_adapter_maps_errors_to_strings() {
    let adapter = SmsGatewayAdapter::new(Box::new(MockSmsService::with_options(false, true)));

    let err = adapter
        .send_verification_code("+15551234567", "123456")
        .await
        .unwrap_err();
    assert!(err.contains("Simulated SMS sending failure"));
    assert_eq!(adapter.provider_name(), "Mock");
}

#[tokio::test]
async fn test_adapter_passes_message_id() {
    let adapter = SmsGatewayAdapter::new(Box::new(MockSmsService::with_options(false, false)));

    let id = adapter
        .send_verification_code("+15551234567", "123456")
        .await
        .unwrap();
    assert!(id.starts_with("mock_"));
}

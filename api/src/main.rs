use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;

use nxt_api::app::create_app;
use nxt_api::routes::kyc::AppState;
use nxt_api::{config, telemetry};
use nxt_core::services::kyc::KycService;
use nxt_core::services::otp::{OtpService, OtpStoreTrait, OtpSweeper};
use nxt_infra::cache::InMemoryOtpStore;
#[cfg(feature = "redis-cache")]
use nxt_infra::cache::{RedisClient, RedisOtpStore};
use nxt_infra::repositories::InMemoryKycAccountRepository;
use nxt_infra::sms::{create_sms_service, SmsGatewayAdapter};
use nxt_shared::config::{AppConfig, OtpStoreBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load();
    telemetry::init(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting NxtBeings KYC API"
    );

    let gateway = SmsGatewayAdapter::new(
        create_sms_service(&config.sms).context("Failed to create SMS service")?,
    );

    match config.otp.store_backend {
        OtpStoreBackend::Memory => {
            let store = Arc::new(InMemoryOtpStore::new(config.otp.store_shards));
            serve(config, gateway, store, "memory").await
        }
        #[cfg(feature = "redis-cache")]
        OtpStoreBackend::Redis => {
            let client = RedisClient::new(config.cache.clone())
                .await
                .context("Failed to connect to Redis")?;
            let store = Arc::new(RedisOtpStore::new(client));
            serve(config, gateway, store, "redis").await
        }
        #[cfg(not(feature = "redis-cache"))]
        OtpStoreBackend::Redis => {
            anyhow::bail!("OTP_STORE_BACKEND=redis requires the redis-cache feature")
        }
    }
}

/// Wire the services around `store`, run the server, then stop the sweeper
async fn serve<C>(
    config: AppConfig,
    gateway: SmsGatewayAdapter,
    store: Arc<C>,
    store_backend: &str,
) -> anyhow::Result<()>
where
    C: OtpStoreTrait + 'static,
{
    let sms_provider = gateway.provider_name().to_string();
    let otp_service = Arc::new(OtpService::new(
        Arc::new(gateway),
        store,
        config::otp_service_config(&config),
    ));
    let accounts = Arc::new(InMemoryKycAccountRepository::new());
    let kyc_service = Arc::new(KycService::new(otp_service.clone(), accounts));
    let state = web::Data::new(
        AppState::new(kyc_service).with_components(store_backend, sms_provider.as_str()),
    );

    let bind_address = config.server.bind_address();
    let cors = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;

    let mut server = HttpServer::new(move || create_app(state.clone(), &cors, max_payload_size))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!(
        address = %bind_address,
        store = store_backend,
        sms_provider = %sms_provider,
        "Server listening"
    );

    let sweeper = Arc::new(OtpSweeper::new(otp_service));
    let sweeper_handle = sweeper.start();

    let result = server.run().await;

    sweeper_handle.stop().await;
    tracing::info!("Server stopped");

    result.context("HTTP server terminated with an error")
}

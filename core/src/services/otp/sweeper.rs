//! Background sweeper that reclaims expired OTP records
//!
//! Lazy eviction on verify only removes records somebody asks about; codes
//! that are requested and then abandoned are reclaimed here.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::errors::DomainResult;

use super::service::OtpService;
use super::traits::{OtpStoreTrait, SmsServiceTrait};
use super::types::SweepResult;

/// Periodically runs [`OtpService::sweep_expired`]
pub struct OtpSweeper<S: SmsServiceTrait + 'static, C: OtpStoreTrait + 'static> {
    service: Arc<OtpService<S, C>>,
    interval: Duration,
}

impl<S: SmsServiceTrait + 'static, C: OtpStoreTrait + 'static> OtpSweeper<S, C> {
    /// Create a sweeper using the service's configured interval
    pub fn new(service: Arc<OtpService<S, C>>) -> Self {
        let interval = service.config().sweep_interval;
        Self::with_interval(service, interval)
    }

    pub fn with_interval(service: Arc<OtpService<S, C>>, interval: Duration) -> Self {
        Self { service, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a single sweep cycle
    pub async fn run_once(&self) -> DomainResult<SweepResult> {
        self.service.sweep_expired().await
    }

    /// Spawn the sweep loop on the current tokio runtime.
    ///
    /// The first sweep happens one interval after start. The loop ends when
    /// [`SweeperHandle::stop`] is called or the handle is dropped.
    pub fn start(self: Arc<Self>) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let period = self.interval;

        let task = tokio::spawn(async move {
            info!(
                interval_seconds = period.as_secs(),
                "OTP sweeper started"
            );

            let Some(first_tick) = Instant::now().checked_add(period) else {
                warn!(
                    interval_seconds = period.as_secs(),
                    "OTP sweep interval out of range, sweeping disabled"
                );
                let _ = shutdown_rx.await;
                info!("OTP sweeper stopped");
                return;
            };

            let mut ticker = interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        match self.run_once().await {
                            Ok(result) if !result.is_success() => {
                                warn!("OTP sweep completed with errors: {:?}", result.errors);
                            }
                            Ok(_) => {}
                            Err(e) => error!("OTP sweep cycle failed: {}", e),
                        }
                    }
                }
            }

            info!("OTP sweeper stopped");
        });

        SweeperHandle {
            shutdown: Some(shutdown_tx),
            task,
        }
    }
}

/// Handle to a running sweeper
pub struct SweeperHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the loop to exit and wait for it.
    ///
    /// A sweep already in progress runs to completion first.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Err(e) = self.task.await {
            error!("OTP sweeper task ended abnormally: {}", e);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

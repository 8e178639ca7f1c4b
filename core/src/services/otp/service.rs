//! OTP lifecycle service implementation

use std::sync::Arc;

use nxt_shared::phone::mask_phone_number;

use crate::domain::entities::otp_record::{OtpKey, OtpRecord, UserRole};
use crate::domain::entities::verification_outcome::{RejectionReason, VerificationOutcome};
use crate::errors::{DomainError, DomainResult, OtpError};

use super::config::OtpServiceConfig;
use super::generator::generate_code;
use super::traits::{OtpStoreTrait, SmsServiceTrait, SystemTimeSource, TimeSource};
use super::types::{SendCodeResult, SweepResult};

/// Orchestrates sending, verifying and sweeping one-time passcodes
pub struct OtpService<S: SmsServiceTrait, C: OtpStoreTrait> {
    /// SMS gateway used for delivery
    sms_service: Arc<S>,
    /// Record store
    store: Arc<C>,
    /// Service configuration
    config: OtpServiceConfig,
    /// Clock used for expiry decisions
    clock: Arc<dyn TimeSource>,
}

impl<S: SmsServiceTrait, C: OtpStoreTrait> OtpService<S, C> {
    /// Create a service that reads the wall clock
    pub fn new(sms_service: Arc<S>, store: Arc<C>, config: OtpServiceConfig) -> Self {
        Self::with_time_source(sms_service, store, config, Arc::new(SystemTimeSource))
    }

    /// Create a service with an explicit time source
    pub fn with_time_source(
        sms_service: Arc<S>,
        store: Arc<C>,
        config: OtpServiceConfig,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            sms_service,
            store,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<C> {
        &self.store
    }

    /// Issue a new code for (phone, role) and dispatch it.
    ///
    /// Any previous code for the key is replaced. The record is written before
    /// dispatch and survives a delivery failure, so a code that did reach the
    /// user despite a gateway error still verifies.
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - The key, provider message id and expiry
    /// * `Err(DomainError::Otp(OtpError::DeliveryFailed))` - Gateway error or timeout
    /// * `Err(DomainError::Internal)` - The store is unreachable or the expiry is out of range
    pub async fn send_code(&self, phone: &str, role: UserRole) -> DomainResult<SendCodeResult> {
        let key = OtpKey::new(phone, role);
        let code = generate_code();
        let record = OtpRecord::new(code.clone(), self.clock.now(), self.config.code_expiration_minutes)
            .ok_or_else(|| DomainError::Internal {
                message: format!(
                    "OTP expiry of {} minutes is out of range",
                    self.config.code_expiration_minutes
                ),
            })?;
        let expires_at = record.expires_at;

        self.store.put(&key, record).await.map_err(|e| {
            tracing::error!(
                phone = %mask_phone_number(phone),
                role = %role,
                error = %e,
                event = "otp_storage_failed",
                "Failed to store OTP"
            );
            DomainError::Internal {
                message: format!("Failed to store OTP: {}", e),
            }
        })?;

        tracing::info!(
            phone = %mask_phone_number(phone),
            role = %role,
            expires_at = %expires_at,
            event = "otp_generated",
            "Generated new OTP"
        );

        let dispatch = self.sms_service.send_verification_code(phone, &code);
        let message_id = match tokio::time::timeout(self.config.delivery_timeout, dispatch).await {
            Ok(Ok(message_id)) => message_id,
            Ok(Err(reason)) => return Err(self.delivery_failed(phone, role, reason)),
            Err(_) => {
                let reason = format!(
                    "SMS delivery timed out after {}s",
                    self.config.delivery_timeout.as_secs_f32()
                );
                return Err(self.delivery_failed(phone, role, reason));
            }
        };

        tracing::debug!(
            phone = %mask_phone_number(phone),
            message_id = %message_id,
            event = "otp_dispatched",
            "OTP handed to SMS gateway"
        );

        Ok(SendCodeResult {
            key,
            message_id,
            expires_at,
        })
    }

    fn delivery_failed(&self, phone: &str, role: UserRole, reason: String) -> DomainError {
        tracing::warn!(
            phone = %mask_phone_number(phone),
            role = %role,
            reason = %reason,
            event = "otp_delivery_failed",
            "Failed to deliver OTP"
        );
        DomainError::Otp(OtpError::DeliveryFailed { reason })
    }

    /// Check `input` against the code stored for (phone, role).
    ///
    /// Rejections are returned as `Ok(VerificationOutcome::Rejected(_))`;
    /// `Err` is reserved for store failures.
    pub async fn verify_code(
        &self,
        phone: &str,
        role: UserRole,
        input: &str,
    ) -> DomainResult<VerificationOutcome> {
        let key = OtpKey::new(phone, role);
        let outcome = self
            .store
            .attempt(&key, input, self.clock.now(), self.config.max_attempts)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to verify OTP: {}", e),
            })?;

        match outcome {
            VerificationOutcome::Accepted => {
                tracing::info!(
                    phone = %mask_phone_number(phone),
                    role = %role,
                    event = "otp_verified",
                    "OTP verified"
                );
            }
            VerificationOutcome::Rejected(RejectionReason::TooManyAttempts) => {
                tracing::warn!(
                    phone = %mask_phone_number(phone),
                    role = %role,
                    reason = RejectionReason::TooManyAttempts.code(),
                    event = "otp_rejected",
                    "OTP attempt budget exhausted"
                );
            }
            VerificationOutcome::Rejected(reason) => {
                tracing::info!(
                    phone = %mask_phone_number(phone),
                    role = %role,
                    reason = reason.code(),
                    event = "otp_rejected",
                    "OTP rejected"
                );
            }
        }

        Ok(outcome)
    }

    /// Remove every record that is expired at the current instant.
    ///
    /// Expiry is re-checked by the store at removal time, so a key renewed
    /// between the scan and the removal keeps its new record.
    pub async fn sweep_expired(&self) -> DomainResult<SweepResult> {
        let now = self.clock.now();
        let entries = self.store.scan().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to scan OTP store: {}", e),
        })?;

        let mut result = SweepResult {
            scanned: entries.len(),
            ..Default::default()
        };

        for (key, record) in entries {
            if !record.is_expired_at(now) {
                continue;
            }
            match self.store.remove_if_expired(&key, now).await {
                Ok(true) => result.removed += 1,
                Ok(false) => {}
                Err(e) => result.errors.push(format!("{}: {}", key.role, e)),
            }
        }

        tracing::info!(
            scanned = result.scanned,
            removed = result.removed,
            failed = result.errors.len(),
            event = "otp_sweep",
            "Swept expired OTPs"
        );

        Ok(result)
    }
}

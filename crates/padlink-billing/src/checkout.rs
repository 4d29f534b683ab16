// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-authorization payment confirmation.
//!
//! Apple Pay and PayPal both end in [`PaymentGateway::authorize`]; once a
//! gateway approves, this flow records the payment, redeems the coupon and
//! advances the subscription. A declined payment writes nothing. A total
//! that a coupon brought to zero is confirmed without calling the gateway.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use padlink_config::model::SubscriptionConfig;
use padlink_core::traits::{
    CouponRepository, PaymentGateway, PreferenceStore, StorageAdapter, SubscriptionBackend,
};
use padlink_core::types::{
    PaymentOutcome, PaymentProvider, PaymentReceipt, PaymentRecord, PaymentRequest,
    SubscriptionState, timestamp,
};
use tracing::{error, info, warn};

use crate::reconcile::SubscriptionReconciler;

/// Confirms payments for one user.
pub struct CheckoutFlow {
    user_id: String,
    period: Duration,
    storage: Arc<dyn StorageAdapter>,
    coupons: Arc<dyn CouponRepository>,
    backend: Arc<dyn SubscriptionBackend>,
    reconciler: SubscriptionReconciler,
}

impl CheckoutFlow {
    pub fn new(
        user_id: impl Into<String>,
        config: &SubscriptionConfig,
        storage: Arc<dyn StorageAdapter>,
        coupons: Arc<dyn CouponRepository>,
        prefs: Arc<dyn PreferenceStore>,
        backend: Arc<dyn SubscriptionBackend>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            period: Duration::days(i64::from(config.period_days)),
            reconciler: SubscriptionReconciler::new(backend.clone(), prefs),
            storage,
            coupons,
            backend,
        }
    }

    /// Authorize `request` through `gateway` and, on approval, confirm it.
    ///
    /// Gateway errors collapse to [`PaymentOutcome::Failure`]. Once the
    /// gateway approved, the outcome is [`PaymentOutcome::Success`] even if
    /// a local write fails; those failures are logged.
    pub async fn attempt_payment(
        &self,
        gateway: &dyn PaymentGateway,
        request: &PaymentRequest,
        now: DateTime<Utc>,
    ) -> PaymentOutcome {
        let receipt = if request.is_free() {
            info!(user_id = %self.user_id, "total is zero, skipping gateway");
            PaymentReceipt {
                provider: PaymentProvider::Coupon,
                order_id: format!("FREE-{}", uuid::Uuid::new_v4()),
            }
        } else {
            match gateway.authorize(request).await {
                Ok(receipt) => receipt,
                Err(e) => {
                    warn!(
                        provider = %gateway.provider(),
                        amount = %request.amount_value(),
                        error = %e,
                        "payment not authorized"
                    );
                    return PaymentOutcome::Failure;
                }
            }
        };

        self.confirm(&receipt, request, now).await;
        PaymentOutcome::Success(receipt)
    }

    /// Write the local confirmation. The money has already moved, so every
    /// step runs regardless of earlier failures.
    async fn confirm(
        &self,
        receipt: &PaymentReceipt,
        request: &PaymentRequest,
        now: DateTime<Utc>,
    ) {
        let record = PaymentRecord {
            id: uuid::Uuid::new_v4().to_string(),
            provider: receipt.provider,
            order_id: receipt.order_id.clone(),
            amount: request.amount,
            currency: request.currency.clone(),
            coupon_code: request.coupon.as_ref().map(|(code, _)| code.clone()),
            created_at: timestamp(now),
        };
        if let Err(e) = self.storage.record_payment(&record).await {
            error!(order_id = %receipt.order_id, error = %e, "failed to record payment");
        }

        let expiry = now + self.period;
        if let Err(e) = self
            .reconciler
            .persist(&SubscriptionState::Subscribed { expiry })
            .await
        {
            error!(user_id = %self.user_id, error = %e, "failed to persist subscription");
        }

        if let Some((code, scope)) = &request.coupon {
            match self.coupons.invalidate(code, *scope).await {
                Ok(removed) => info!(code = %code, %scope, removed, "coupon redeemed"),
                Err(e) => warn!(code = %code, %scope, error = %e, "failed to redeem coupon"),
            }
        }

        if let Err(e) = self.backend.record(&self.user_id, expiry).await {
            warn!(user_id = %self.user_id, error = %e, "failed to record subscription remotely");
        }

        info!(
            user_id = %self.user_id,
            provider = %receipt.provider,
            order_id = %receipt.order_id,
            amount = %request.amount_value(),
            expiry = %timestamp(expiry),
            "payment confirmed"
        );
    }
}

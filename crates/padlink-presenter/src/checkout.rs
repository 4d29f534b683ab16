// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Checkout screen model: price, coupon and payment outcome.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use padlink_billing::{CheckoutFlow, CouponCheck, check_coupon, format_amount, total};
use padlink_config::model::SubscriptionConfig;
use padlink_core::PadlinkError;
use padlink_core::traits::{CouponRepository, PaymentGateway};
use padlink_core::types::{CouponScope, PaymentOutcome, PaymentRequest};
use tracing::info;

use crate::state::StateHolder;

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutStatus {
    Idle,
    CouponApplied,
    CouponInvalid,
    Paid { order_id: String },
    PaymentFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutState {
    pub price: f64,
    pub currency: String,
    /// Discount percentage currently applied.
    pub discount: f64,
    /// `total(price, discount)` with two decimals.
    pub total: String,
    pub coupon: Option<(String, CouponScope)>,
    pub status: CheckoutStatus,
}

pub struct CheckoutModel {
    price: f64,
    currency: String,
    coupons: Arc<dyn CouponRepository>,
    flow: CheckoutFlow,
    state: StateHolder<CheckoutState>,
}

impl CheckoutModel {
    pub fn new(
        config: &SubscriptionConfig,
        coupons: Arc<dyn CouponRepository>,
        flow: CheckoutFlow,
    ) -> Self {
        let initial = CheckoutState {
            price: config.price,
            currency: config.currency.clone(),
            discount: 0.0,
            total: format_amount(total(config.price, 0.0)),
            coupon: None,
            status: CheckoutStatus::Idle,
        };
        Self {
            price: config.price,
            currency: config.currency.clone(),
            coupons,
            flow,
            state: StateHolder::new(initial),
        }
    }

    pub fn state(&self) -> &StateHolder<CheckoutState> {
        &self.state
    }

    /// Apply a coupon. An invalid code leaves the current discount in place.
    pub async fn apply_coupon(
        &self,
        code: &str,
        scope: CouponScope,
    ) -> Result<CouponCheck, PadlinkError> {
        let check = check_coupon(self.coupons.as_ref(), code, scope).await?;
        let mut next = self.state.snapshot();
        match check {
            CouponCheck::Valid { discount } => {
                next.discount = discount;
                next.total = format_amount(total(self.price, discount));
                next.coupon = Some((code.trim().to_string(), scope));
                next.status = CheckoutStatus::CouponApplied;
            }
            CouponCheck::Invalid => {
                next.status = CheckoutStatus::CouponInvalid;
            }
        }
        self.state.publish(next);
        Ok(check)
    }

    /// The request a gateway would be asked to authorize right now.
    pub fn payment_request(&self) -> PaymentRequest {
        let snapshot = self.state.snapshot();
        PaymentRequest {
            amount: total(self.price, snapshot.discount),
            currency: self.currency.clone(),
            coupon: snapshot.coupon,
        }
    }

    /// Pay the current total through `gateway`.
    ///
    /// After success the redeemed coupon is dropped from the state.
    pub async fn pay(
        &self,
        gateway: &dyn PaymentGateway,
        now: DateTime<Utc>,
    ) -> PaymentOutcome {
        let request = self.payment_request();
        let outcome = self.flow.attempt_payment(gateway, &request, now).await;
        let mut next = self.state.snapshot();
        match &outcome {
            PaymentOutcome::Success(receipt) => {
                info!(order_id = %receipt.order_id, "checkout complete");
                next.discount = 0.0;
                next.total = format_amount(total(self.price, 0.0));
                next.coupon = None;
                next.status = CheckoutStatus::Paid {
                    order_id: receipt.order_id.clone(),
                };
            }
            PaymentOutcome::Failure => next.status = CheckoutStatus::PaymentFailed,
        }
        self.state.publish(next);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padlink_core::traits::StorageAdapter;
    use padlink_test_utils::TestHarness;

    fn config(price: f64) -> SubscriptionConfig {
        SubscriptionConfig {
            price,
            ..SubscriptionConfig::default()
        }
    }

    fn model(harness: &TestHarness, price: f64) -> CheckoutModel {
        let cfg = config(price);
        let flow = CheckoutFlow::new(
            harness.owner_id.clone(),
            &cfg,
            harness.storage.clone(),
            harness.storage.clone(),
            harness.storage.clone(),
            harness.subscriptions.clone(),
        );
        CheckoutModel::new(&cfg, harness.storage.clone(), flow)
    }

    #[tokio::test]
    async fn valid_coupon_updates_total() {
        let harness = TestHarness::builder()
            .with_coupon("QUARTER", CouponScope::Public, 25.0)
            .build()
            .await
            .unwrap();
        let model = model(&harness, 100.0);
        assert_eq!(model.state().snapshot().total, "100.00");

        model
            .apply_coupon("QUARTER", CouponScope::Public)
            .await
            .unwrap();
        let state = model.state().snapshot();
        assert_eq!(state.total, "75.00");
        assert_eq!(state.discount, 25.0);
        assert_eq!(state.status, CheckoutStatus::CouponApplied);
    }

    #[tokio::test]
    async fn invalid_coupon_keeps_previous_discount() {
        let harness = TestHarness::builder()
            .with_coupon("QUARTER", CouponScope::Public, 25.0)
            .build()
            .await
            .unwrap();
        let model = model(&harness, 100.0);
        model
            .apply_coupon("QUARTER", CouponScope::Public)
            .await
            .unwrap();

        let check = model
            .apply_coupon("QUARTER", CouponScope::Private)
            .await
            .unwrap();
        assert_eq!(check, CouponCheck::Invalid);
        let state = model.state().snapshot();
        assert_eq!(state.discount, 25.0);
        assert_eq!(state.total, "75.00");
        assert_eq!(state.status, CheckoutStatus::CouponInvalid);
    }

    #[tokio::test]
    async fn pay_charges_discounted_total_and_records_once() {
        let harness = TestHarness::builder()
            .with_coupon("HALF", CouponScope::Private, 50.0)
            .build()
            .await
            .unwrap();
        let model = model(&harness, 20.0);
        model.apply_coupon("HALF", CouponScope::Private).await.unwrap();

        let outcome = model.pay(harness.gateway.as_ref(), Utc::now()).await;
        assert!(matches!(outcome, PaymentOutcome::Success(_)));

        let sent = harness.gateway.requests().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].amount_value(), "10.00");
        assert_eq!(harness.storage.list_payments().await.unwrap().len(), 1);

        let state = model.state().snapshot();
        assert_eq!(
            state.status,
            CheckoutStatus::Paid {
                order_id: "MOCK-ORDER-1".into()
            }
        );
        assert!(state.coupon.is_none());
    }

    #[tokio::test]
    async fn declined_payment_sets_failed_status() {
        let harness = TestHarness::builder()
            .with_declining_gateway()
            .build()
            .await
            .unwrap();
        let model = model(&harness, 9.99);

        let outcome = model.pay(harness.gateway.as_ref(), Utc::now()).await;
        assert_eq!(outcome, PaymentOutcome::Failure);
        assert_eq!(model.state().snapshot().status, CheckoutStatus::PaymentFailed);
        assert!(harness.storage.list_payments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn full_discount_coupon_pays_without_gateway() {
        let harness = TestHarness::builder()
            .with_coupon("GIFT", CouponScope::Private, 100.0)
            .build()
            .await
            .unwrap();
        let model = model(&harness, 9.99);
        model.apply_coupon("GIFT", CouponScope::Private).await.unwrap();
        assert_eq!(model.state().snapshot().total, "0.00");

        let outcome = model.pay(harness.gateway.as_ref(), Utc::now()).await;
        assert!(matches!(outcome, PaymentOutcome::Success(_)));
        assert_eq!(harness.gateway.call_count(), 0);
        assert!(matches!(
            model.state().snapshot().status,
            CheckoutStatus::Paid { .. }
        ));
        assert_eq!(harness.storage.list_payments().await.unwrap().len(), 1);
    }
}

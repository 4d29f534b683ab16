// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pricing, coupon redemption, subscription reconciliation and payment
//! confirmation for padlink.
//!
//! Everything here works against the adapter traits in `padlink-core`, so
//! the same flow runs over SQLite in production and in-memory mocks in tests.

pub mod checkout;
pub mod coupons;
pub mod pricing;
pub mod reconcile;

pub use checkout::CheckoutFlow;
pub use coupons::{CouponCheck, check_coupon};
pub use pricing::{format_amount, total};
pub use reconcile::SubscriptionReconciler;

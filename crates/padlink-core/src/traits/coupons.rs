// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Coupon lookup and redemption.

use async_trait::async_trait;

use crate::error::PadlinkError;
use crate::types::{Coupon, CouponScope};

/// Source of discount codes.
///
/// Lookups are always keyed by `(code, scope)`: a private code is invisible
/// to a public lookup and vice versa.
#[async_trait]
pub trait CouponRepository: Send + Sync {
    async fn exists(&self, code: &str, scope: CouponScope) -> Result<bool, PadlinkError>;

    /// Stored discount percentage, if the coupon exists.
    async fn discount(&self, code: &str, scope: CouponScope) -> Result<Option<f64>, PadlinkError>;

    async fn save(&self, coupon: &Coupon) -> Result<(), PadlinkError>;

    /// Marks a coupon as used. Private coupons are deleted; public coupons
    /// are left in place. Returns `true` if a row was removed.
    async fn invalidate(&self, code: &str, scope: CouponScope) -> Result<bool, PadlinkError>;
}

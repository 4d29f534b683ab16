// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Coupon validation against a [`CouponRepository`].

use padlink_core::PadlinkError;
use padlink_core::traits::CouponRepository;
use padlink_core::types::CouponScope;
use tracing::debug;

/// Outcome of checking a coupon code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CouponCheck {
    /// The code exists in the requested scope; apply this discount.
    Valid { discount: f64 },
    /// Unknown code, or known only in the other scope.
    Invalid,
}

/// Look up `(code, scope)`. The discount is only reported when the
/// existence check for the same scope succeeds.
pub async fn check_coupon(
    coupons: &dyn CouponRepository,
    code: &str,
    scope: CouponScope,
) -> Result<CouponCheck, PadlinkError> {
    let code = code.trim();
    if code.is_empty() || !coupons.exists(code, scope).await? {
        debug!(code, %scope, "coupon rejected");
        return Ok(CouponCheck::Invalid);
    }
    match coupons.discount(code, scope).await? {
        Some(discount) => {
            debug!(code, %scope, discount, "coupon accepted");
            Ok(CouponCheck::Valid { discount })
        }
        None => Ok(CouponCheck::Invalid),
    }
}

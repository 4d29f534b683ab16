// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Coupon lookups and redemption.

use padlink_core::PadlinkError;
use rusqlite::{OptionalExtension, params};

use crate::database::Database;
use crate::models::{Coupon, CouponScope};

/// Whether `(code, scope)` exists.
pub async fn coupon_exists(
    db: &Database,
    code: &str,
    scope: CouponScope,
) -> Result<bool, PadlinkError> {
    Ok(coupon_discount(db, code, scope).await?.is_some())
}

/// Stored discount percentage for `(code, scope)`.
pub async fn coupon_discount(
    db: &Database,
    code: &str,
    scope: CouponScope,
) -> Result<Option<f64>, PadlinkError> {
    let code = code.to_string();
    let scope = scope.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT discount FROM coupons WHERE code = ?1 AND scope = ?2",
                params![code, scope],
                |row| row.get::<_, f64>(0),
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or replace a coupon. The discount must lie in `[0, 100]`.
pub async fn save_coupon(db: &Database, coupon: &Coupon) -> Result<(), PadlinkError> {
    if coupon.code.trim().is_empty() {
        return Err(PadlinkError::Validation(
            "coupon code must not be blank".to_string(),
        ));
    }
    if !(0.0..=100.0).contains(&coupon.discount) {
        return Err(PadlinkError::Validation(format!(
            "coupon discount must be between 0 and 100, got {}",
            coupon.discount
        )));
    }
    let code = coupon.code.trim().to_string();
    let scope = coupon.scope.to_string();
    let discount = coupon.discount;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO coupons (code, scope, discount) VALUES (?1, ?2, ?3)
                 ON CONFLICT(code, scope) DO UPDATE SET discount = excluded.discount",
                params![code, scope, discount],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Redeem a coupon. Private coupons are single-use and get deleted; public
/// coupons are shared and stay. Returns `true` if a row was removed.
pub async fn invalidate_coupon(
    db: &Database,
    code: &str,
    scope: CouponScope,
) -> Result<bool, PadlinkError> {
    if scope == CouponScope::Public {
        return Ok(false);
    }
    let code = code.to_string();
    let scope = scope.to_string();
    db.connection()
        .call(move |conn| {
            let removed = conn.execute(
                "DELETE FROM coupons WHERE code = ?1 AND scope = ?2",
                params![code, scope],
            )?;
            Ok(removed == 1)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Map-backed preference and coupon stores.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use padlink_core::traits::{CouponRepository, PreferenceStore};
use padlink_core::types::{Coupon, CouponScope};
use padlink_core::PadlinkError;

#[derive(Debug, Clone, Copy, PartialEq)]
enum PrefValue {
    Bool(bool),
    Int(i64),
}

/// Preference store held entirely in memory.
#[derive(Default)]
pub struct InMemoryPreferences {
    values: Mutex<HashMap<String, PrefValue>>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.values.lock().await.contains_key(key)
    }
}

fn wrong_type(key: &str) -> PadlinkError {
    PadlinkError::storage(format!("preference {key} holds a different type"))
}

#[async_trait]
impl PreferenceStore for InMemoryPreferences {
    async fn get_bool(&self, key: &str) -> Result<Option<bool>, PadlinkError> {
        match self.values.lock().await.get(key) {
            None => Ok(None),
            Some(PrefValue::Bool(b)) => Ok(Some(*b)),
            Some(PrefValue::Int(_)) => Err(wrong_type(key)),
        }
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<(), PadlinkError> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), PrefValue::Bool(value));
        Ok(())
    }

    async fn get_i64(&self, key: &str) -> Result<Option<i64>, PadlinkError> {
        match self.values.lock().await.get(key) {
            None => Ok(None),
            Some(PrefValue::Int(v)) => Ok(Some(*v)),
            Some(PrefValue::Bool(_)) => Err(wrong_type(key)),
        }
    }

    async fn set_i64(&self, key: &str, value: i64) -> Result<(), PadlinkError> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), PrefValue::Int(value));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PadlinkError> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}

/// Coupon repository held entirely in memory.
#[derive(Default)]
pub struct InMemoryCoupons {
    coupons: Mutex<HashMap<(String, CouponScope), f64>>,
    fail_invalidate: AtomicBool,
}

impl InMemoryCoupons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository.
    pub async fn with(self, code: &str, scope: CouponScope, discount: f64) -> Self {
        self.coupons
            .lock()
            .await
            .insert((code.to_string(), scope), discount);
        self
    }

    /// Make every subsequent `invalidate` fail with a storage error.
    pub fn set_failing_invalidate(&self, fail: bool) {
        self.fail_invalidate.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CouponRepository for InMemoryCoupons {
    async fn exists(&self, code: &str, scope: CouponScope) -> Result<bool, PadlinkError> {
        Ok(self
            .coupons
            .lock()
            .await
            .contains_key(&(code.to_string(), scope)))
    }

    async fn discount(&self, code: &str, scope: CouponScope) -> Result<Option<f64>, PadlinkError> {
        Ok(self
            .coupons
            .lock()
            .await
            .get(&(code.to_string(), scope))
            .copied())
    }

    async fn save(&self, coupon: &Coupon) -> Result<(), PadlinkError> {
        if !(0.0..=100.0).contains(&coupon.discount) {
            return Err(PadlinkError::Validation(format!(
                "coupon discount must be between 0 and 100, got {}",
                coupon.discount
            )));
        }
        self.coupons
            .lock()
            .await
            .insert((coupon.code.clone(), coupon.scope), coupon.discount);
        Ok(())
    }

    async fn invalidate(&self, code: &str, scope: CouponScope) -> Result<bool, PadlinkError> {
        if self.fail_invalidate.load(Ordering::SeqCst) {
            return Err(PadlinkError::storage("disk full"));
        }
        if scope == CouponScope::Public {
            return Ok(false);
        }
        Ok(self
            .coupons
            .lock()
            .await
            .remove(&(code.to_string(), scope))
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn preferences_round_trip_and_remove() {
        let prefs = InMemoryPreferences::new();
        prefs.set_bool("flag", true).await.unwrap();
        prefs.set_i64("n", 7).await.unwrap();
        assert_eq!(prefs.get_bool("flag").await.unwrap(), Some(true));
        assert_eq!(prefs.get_i64("n").await.unwrap(), Some(7));
        assert!(prefs.get_i64("flag").await.is_err());
        prefs.remove("n").await.unwrap();
        assert!(!prefs.contains("n").await);
    }

    #[tokio::test]
    async fn private_coupons_are_single_use() {
        let coupons = InMemoryCoupons::new()
            .with("ONCE", CouponScope::Private, 20.0)
            .await
            .with("ALL", CouponScope::Public, 10.0)
            .await;

        assert!(coupons.invalidate("ONCE", CouponScope::Private).await.unwrap());
        assert!(!coupons.exists("ONCE", CouponScope::Private).await.unwrap());
        assert!(!coupons.invalidate("ALL", CouponScope::Public).await.unwrap());
        assert!(coupons.exists("ALL", CouponScope::Public).await.unwrap());
    }

    #[tokio::test]
    async fn failing_invalidate_keeps_coupon() {
        let coupons = InMemoryCoupons::new()
            .with("ONCE", CouponScope::Private, 20.0)
            .await;
        coupons.set_failing_invalidate(true);

        let err = coupons
            .invalidate("ONCE", CouponScope::Private)
            .await
            .unwrap_err();
        assert!(err.is_storage_unavailable());
        assert!(coupons.exists("ONCE", CouponScope::Private).await.unwrap());
    }
}

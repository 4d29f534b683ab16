// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory subscription backend with failure injection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use padlink_core::traits::{PluginAdapter, SubscriptionBackend};
use padlink_core::types::{AdapterType, HealthStatus};
use padlink_core::PadlinkError;

/// Subscription records keyed by user id.
///
/// A record may exist with no expiry, matching a remote document that
/// lacks the expiry field.
#[derive(Default)]
pub struct MockSubscriptionBackend {
    records: Mutex<HashMap<String, Option<DateTime<Utc>>>>,
    fail_exists: AtomicBool,
    fail_expiry: AtomicBool,
}

impl MockSubscriptionBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record; `None` models a record without an expiry field.
    pub async fn insert(&self, user_id: &str, expiry: Option<DateTime<Utc>>) {
        self.records
            .lock()
            .await
            .insert(user_id.to_string(), expiry);
    }

    /// Make `exists` fail with a subscription error.
    pub fn fail_exists(&self, fail: bool) {
        self.fail_exists.store(fail, Ordering::SeqCst);
    }

    /// Make `expiry` fail with a subscription error.
    pub fn fail_expiry(&self, fail: bool) {
        self.fail_expiry.store(fail, Ordering::SeqCst);
    }

    pub async fn stored(&self, user_id: &str) -> Option<Option<DateTime<Utc>>> {
        self.records.lock().await.get(user_id).copied()
    }
}

fn unreachable_backend() -> PadlinkError {
    PadlinkError::Subscription {
        message: "mock backend unreachable".into(),
        source: None,
    }
}

#[async_trait]
impl PluginAdapter for MockSubscriptionBackend {
    fn name(&self) -> &str {
        "mock-subscription"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Subscription
    }

    async fn health_check(&self) -> Result<HealthStatus, PadlinkError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PadlinkError> {
        Ok(())
    }
}

#[async_trait]
impl SubscriptionBackend for MockSubscriptionBackend {
    async fn exists(&self, user_id: &str) -> Result<bool, PadlinkError> {
        if self.fail_exists.load(Ordering::SeqCst) {
            return Err(unreachable_backend());
        }
        Ok(self.records.lock().await.contains_key(user_id))
    }

    async fn expiry(&self, user_id: &str) -> Result<Option<DateTime<Utc>>, PadlinkError> {
        if self.fail_expiry.load(Ordering::SeqCst) {
            return Err(unreachable_backend());
        }
        Ok(self.records.lock().await.get(user_id).copied().flatten())
    }

    async fn record(&self, user_id: &str, expiry: DateTime<Utc>) -> Result<(), PadlinkError> {
        self.insert(user_id, Some(expiry)).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn record_without_expiry_exists() {
        let backend = MockSubscriptionBackend::new();
        backend.insert("alice", None).await;
        assert!(backend.exists("alice").await.unwrap());
        assert_eq!(backend.expiry("alice").await.unwrap(), None);
        assert!(!backend.exists("bob").await.unwrap());
    }

    #[tokio::test]
    async fn failure_injection() {
        let backend = MockSubscriptionBackend::new();
        backend.fail_exists(true);
        assert!(backend.exists("alice").await.is_err());
        backend.fail_exists(false);
        backend.fail_expiry(true);
        assert!(backend.expiry("alice").await.is_err());
    }
}

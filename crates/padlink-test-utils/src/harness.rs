// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for integration testing.
//!
//! `TestHarness` opens a real SQLite store in a temp directory and pairs it
//! with mock collaborators, so tests exercise the actual schema.

use std::sync::Arc;

use padlink_config::model::StorageConfig;
use padlink_core::types::{Coupon, CouponScope};
use padlink_core::{CouponRepository, PadlinkError, StorageAdapter};
use padlink_storage::SqliteStorage;

use crate::mock_channel::MockChannel;
use crate::mock_gateway::MockGateway;
use crate::mock_subscription::MockSubscriptionBackend;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    owner_id: String,
    coupons: Vec<Coupon>,
    declining_gateway: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            owner_id: "test-user".to_string(),
            coupons: Vec::new(),
            declining_gateway: false,
        }
    }

    pub fn with_owner(mut self, owner_id: &str) -> Self {
        self.owner_id = owner_id.to_string();
        self
    }

    /// Seed a coupon into the SQLite store.
    pub fn with_coupon(mut self, code: &str, scope: CouponScope, discount: f64) -> Self {
        self.coupons.push(Coupon {
            code: code.to_string(),
            scope,
            discount,
        });
        self
    }

    /// Make the mock gateway decline every payment.
    pub fn with_declining_gateway(mut self) -> Self {
        self.declining_gateway = true;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, PadlinkError> {
        let temp_dir = tempfile::TempDir::new().map_err(PadlinkError::storage)?;
        let db_path = temp_dir.path().join("test.db");

        let storage = SqliteStorage::new(StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        });
        storage.initialize().await?;
        for coupon in &self.coupons {
            CouponRepository::save(&storage, coupon).await?;
        }

        let gateway = if self.declining_gateway {
            MockGateway::declining(padlink_core::types::PaymentProvider::PayPal)
        } else {
            MockGateway::default()
        };

        Ok(TestHarness {
            owner_id: self.owner_id,
            storage: Arc::new(storage),
            channel: Arc::new(MockChannel::new()),
            gateway: Arc::new(gateway),
            subscriptions: Arc::new(MockSubscriptionBackend::new()),
            _temp_dir: temp_dir,
        })
    }
}

/// A complete storage-backed environment for integration tests.
///
/// The temp directory lives as long as the harness.
pub struct TestHarness {
    pub owner_id: String,
    pub storage: Arc<SqliteStorage>,
    pub channel: Arc<MockChannel>,
    pub gateway: Arc<MockGateway>,
    pub subscriptions: Arc<MockSubscriptionBackend>,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Storage that was never initialized; every call fails with a storage error.
    pub fn unavailable_storage() -> Arc<SqliteStorage> {
        Arc::new(SqliteStorage::new(StorageConfig {
            database_path: "unused.db".to_string(),
            wal_mode: true,
        }))
    }
}

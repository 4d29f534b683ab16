// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring of the store, billing flow and view models for one CLI run.

use std::sync::Arc;

use padlink_billing::{CheckoutFlow, SubscriptionReconciler};
use padlink_config::PadlinkConfig;
use padlink_core::traits::StorageAdapter;
use padlink_core::PadlinkError;
use padlink_presenter::{CheckoutModel, SubscriptionModel};
use padlink_storage::SqliteStorage;
use tracing::info;

/// Explicitly constructed handles; nothing here is global.
pub struct App {
    pub config: PadlinkConfig,
    pub storage: Arc<SqliteStorage>,
}

impl App {
    /// Open the SQLite store described by `config`.
    pub async fn open(config: PadlinkConfig) -> Result<Self, PadlinkError> {
        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        info!(path = %config.storage.database_path, "storage ready");
        Ok(Self {
            config,
            storage: Arc::new(storage),
        })
    }

    pub fn owner_id(&self) -> &str {
        &self.config.app.owner_id
    }

    pub fn reconciler(&self) -> SubscriptionReconciler {
        SubscriptionReconciler::new(self.storage.clone(), self.storage.clone())
    }

    pub fn subscription_model(&self) -> SubscriptionModel {
        SubscriptionModel::new(self.owner_id(), self.reconciler())
    }

    pub fn checkout_model(&self) -> CheckoutModel {
        let flow = CheckoutFlow::new(
            self.owner_id(),
            &self.config.subscription,
            self.storage.clone(),
            self.storage.clone(),
            self.storage.clone(),
            self.storage.clone(),
        );
        CheckoutModel::new(&self.config.subscription, self.storage.clone(), flow)
    }

    pub async fn close(self) -> Result<(), PadlinkError> {
        self.storage.close().await
    }
}

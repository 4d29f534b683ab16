// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the storage, preference, coupon and
//! subscription traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;
use tracing::debug;

use padlink_config::model::StorageConfig;
use padlink_core::types::{Coupon, CouponScope, History, Message, NewTask, PaymentRecord, Task};
use padlink_core::{
    AdapterType, CouponRepository, HealthStatus, PadlinkError, PluginAdapter, PreferenceStore,
    StorageAdapter, SubscriptionBackend,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is opened by
/// [`StorageAdapter::initialize`]; every other call fails with a storage
/// error until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: StorageAdapter::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    pub fn db(&self) -> Result<&Database, PadlinkError> {
        self.db.get().ok_or_else(|| {
            PadlinkError::storage("storage not initialized -- call initialize() first")
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, PadlinkError> {
        let db = match self.db() {
            Ok(db) => db,
            Err(e) => return Ok(HealthStatus::Unhealthy(e.to_string())),
        };
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PadlinkError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), PadlinkError> {
        let path = self.config.database_path.clone();
        let db = Database::open_with(&path, self.config.wal_mode).await?;
        self.db
            .set(db)
            .map_err(|_| PadlinkError::storage("storage already initialized"))?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), PadlinkError> {
        self.db()?.checkpoint().await
    }

    // --- Tasks ---

    async fn list_tasks(&self, owner_id: &str) -> Result<Vec<Task>, PadlinkError> {
        queries::tasks::list_tasks(self.db()?, owner_id).await
    }

    async fn add_task(&self, task: &NewTask) -> Result<Task, PadlinkError> {
        queries::tasks::add_task(self.db()?, task).await
    }

    async fn delete_task(&self, owner_id: &str, id: i64) -> Result<bool, PadlinkError> {
        queries::tasks::delete_task(self.db()?, owner_id, id).await
    }

    async fn set_task_enabled(
        &self,
        owner_id: &str,
        id: i64,
        enabled: bool,
    ) -> Result<bool, PadlinkError> {
        queries::tasks::set_task_enabled(self.db()?, owner_id, id, enabled).await
    }

    // --- Histories ---

    async fn append_history(
        &self,
        task_name: &str,
        actions: &[String],
    ) -> Result<History, PadlinkError> {
        queries::histories::append_history(self.db()?, task_name, actions).await
    }

    async fn list_histories(&self) -> Result<Vec<History>, PadlinkError> {
        queries::histories::list_histories(self.db()?).await
    }

    async fn clear_histories(&self) -> Result<u64, PadlinkError> {
        queries::histories::clear_histories(self.db()?).await
    }

    // --- Messages ---

    async fn insert_message(&self, message: &Message) -> Result<(), PadlinkError> {
        queries::messages::insert_message(self.db()?, message).await
    }

    async fn list_messages(&self, email: &str) -> Result<Vec<Message>, PadlinkError> {
        queries::messages::list_messages(self.db()?, email).await
    }

    async fn delete_messages(&self, email: Option<&str>) -> Result<u64, PadlinkError> {
        queries::messages::delete_messages(self.db()?, email).await
    }

    // --- Payments ---

    async fn record_payment(&self, record: &PaymentRecord) -> Result<(), PadlinkError> {
        queries::payments::record_payment(self.db()?, record).await
    }

    async fn list_payments(&self) -> Result<Vec<PaymentRecord>, PadlinkError> {
        queries::payments::list_payments(self.db()?).await
    }
}

#[async_trait]
impl PreferenceStore for SqliteStorage {
    async fn get_bool(&self, key: &str) -> Result<Option<bool>, PadlinkError> {
        queries::preferences::get_bool(self.db()?, key).await
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<(), PadlinkError> {
        queries::preferences::set_bool(self.db()?, key, value).await
    }

    async fn get_i64(&self, key: &str) -> Result<Option<i64>, PadlinkError> {
        queries::preferences::get_i64(self.db()?, key).await
    }

    async fn set_i64(&self, key: &str, value: i64) -> Result<(), PadlinkError> {
        queries::preferences::set_i64(self.db()?, key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), PadlinkError> {
        queries::preferences::remove_value(self.db()?, key).await
    }
}

#[async_trait]
impl CouponRepository for SqliteStorage {
    async fn exists(&self, code: &str, scope: CouponScope) -> Result<bool, PadlinkError> {
        queries::coupons::coupon_exists(self.db()?, code, scope).await
    }

    async fn discount(&self, code: &str, scope: CouponScope) -> Result<Option<f64>, PadlinkError> {
        queries::coupons::coupon_discount(self.db()?, code, scope).await
    }

    async fn save(&self, coupon: &Coupon) -> Result<(), PadlinkError> {
        queries::coupons::save_coupon(self.db()?, coupon).await
    }

    async fn invalidate(&self, code: &str, scope: CouponScope) -> Result<bool, PadlinkError> {
        queries::coupons::invalidate_coupon(self.db()?, code, scope).await
    }
}

#[async_trait]
impl SubscriptionBackend for SqliteStorage {
    async fn exists(&self, user_id: &str) -> Result<bool, PadlinkError> {
        Ok(queries::subscriptions::get_expiry_secs(self.db()?, user_id)
            .await?
            .is_some())
    }

    async fn expiry(&self, user_id: &str) -> Result<Option<DateTime<Utc>>, PadlinkError> {
        queries::subscriptions::get_expiry(self.db()?, user_id).await
    }

    async fn record(&self, user_id: &str, expiry: DateTime<Utc>) -> Result<(), PadlinkError> {
        queries::subscriptions::upsert_subscription(self.db()?, user_id, expiry).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padlink_core::traits::preferences::{IS_SUBSCRIBED_KEY, SUBSCRIPTION_EXPIRY_KEY};
    use tempfile::tempdir;

    fn config_in(dir: &tempfile::TempDir) -> StorageConfig {
        StorageConfig {
            database_path: dir.path().join("adapter.db").to_string_lossy().into_owned(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn calls_before_initialize_are_storage_errors() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(config_in(&dir));

        let err = storage.list_tasks("alice").await.unwrap_err();
        assert!(err.is_storage_unavailable());
        assert!(matches!(
            storage.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
    }

    #[tokio::test]
    async fn double_initialize_fails() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(config_in(&dir));
        storage.initialize().await.unwrap();
        assert!(storage.initialize().await.is_err());
        storage.close().await.unwrap();
    }

    #[tokio::test]
    async fn adapter_metadata() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(config_in(&dir));
        assert_eq!(storage.name(), "sqlite");
        assert_eq!(storage.adapter_type(), AdapterType::Storage);
    }

    #[tokio::test]
    async fn full_lifecycle_through_traits() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(config_in(&dir));
        storage.initialize().await.unwrap();
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);

        let task = storage
            .add_task(&NewTask::new("alice", "Patrol").with_actions(&["F", "R"]))
            .await
            .unwrap();
        assert_eq!(storage.list_tasks("alice").await.unwrap(), vec![task.clone()]);

        storage
            .append_history(&task.title, &task.actions)
            .await
            .unwrap();
        assert_eq!(storage.list_histories().await.unwrap().len(), 1);

        PreferenceStore::set_bool(&storage, IS_SUBSCRIBED_KEY, true)
            .await
            .unwrap();
        PreferenceStore::set_i64(&storage, SUBSCRIPTION_EXPIRY_KEY, 42)
            .await
            .unwrap();
        assert_eq!(
            PreferenceStore::get_i64(&storage, SUBSCRIPTION_EXPIRY_KEY)
                .await
                .unwrap(),
            Some(42)
        );

        CouponRepository::save(
            &storage,
            &Coupon {
                code: "ONCE".into(),
                scope: CouponScope::Private,
                discount: 30.0,
            },
        )
        .await
        .unwrap();
        assert!(
            CouponRepository::exists(&storage, "ONCE", CouponScope::Private)
                .await
                .unwrap()
        );

        let expiry = Utc::now() + chrono::Duration::days(30);
        SubscriptionBackend::record(&storage, "alice", expiry)
            .await
            .unwrap();
        assert!(SubscriptionBackend::exists(&storage, "alice").await.unwrap());
        assert_eq!(
            SubscriptionBackend::expiry(&storage, "alice")
                .await
                .unwrap()
                .map(|e| e.timestamp()),
            Some(expiry.timestamp())
        );

        storage.shutdown().await.unwrap();
        storage.close().await.unwrap();
    }

    #[tokio::test]
    async fn data_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let storage = SqliteStorage::new(config_in(&dir));
            storage.initialize().await.unwrap();
            storage
                .add_task(&NewTask::new("alice", "Keep me"))
                .await
                .unwrap();
            storage.close().await.unwrap();
        }
        let storage = SqliteStorage::new(config_in(&dir));
        storage.initialize().await.unwrap();
        let tasks = storage.list_tasks("alice").await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Keep me");
    }
}

// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for the local task, history, chat and payment store.

use async_trait::async_trait;

use crate::error::PadlinkError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{History, Message, NewTask, PaymentRecord, Task};

/// Adapter for the local persistence backend.
///
/// Every fallible operation fails only when the underlying store is
/// unavailable ([`PadlinkError::Storage`]) or the input is rejected up front
/// ([`PadlinkError::Validation`]).
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Opens the backend and applies pending migrations.
    async fn initialize(&self) -> Result<(), PadlinkError>;

    /// Closes the backend, flushing pending writes.
    async fn close(&self) -> Result<(), PadlinkError>;

    // --- Tasks ---

    /// Tasks belonging to `owner_id`, ordered by ascending id.
    async fn list_tasks(&self, owner_id: &str) -> Result<Vec<Task>, PadlinkError>;

    /// Inserts a task and returns it with its assigned id.
    async fn add_task(&self, task: &NewTask) -> Result<Task, PadlinkError>;

    /// Deletes one task. Returns `false` when no such task exists.
    async fn delete_task(&self, owner_id: &str, id: i64) -> Result<bool, PadlinkError>;

    /// Sets the `enabled` flag. Returns `false` when no such task exists.
    async fn set_task_enabled(
        &self,
        owner_id: &str,
        id: i64,
        enabled: bool,
    ) -> Result<bool, PadlinkError>;

    // --- Histories ---

    /// Appends a completed session's action sequence.
    async fn append_history(
        &self,
        task_name: &str,
        actions: &[String],
    ) -> Result<History, PadlinkError>;

    /// All histories, oldest first.
    async fn list_histories(&self) -> Result<Vec<History>, PadlinkError>;

    /// Deletes every history row and returns how many were removed.
    async fn clear_histories(&self) -> Result<u64, PadlinkError>;

    // --- Messages ---

    async fn insert_message(&self, message: &Message) -> Result<(), PadlinkError>;

    /// Messages exchanged with `email`, ordered by ascending timestamp.
    async fn list_messages(&self, email: &str) -> Result<Vec<Message>, PadlinkError>;

    /// Deletes messages for one peer, or every message when `email` is `None`.
    async fn delete_messages(&self, email: Option<&str>) -> Result<u64, PadlinkError>;

    // --- Payments ---

    async fn record_payment(&self, record: &PaymentRecord) -> Result<(), PadlinkError>;

    /// Payment history, oldest first.
    async fn list_payments(&self) -> Result<Vec<PaymentRecord>, PadlinkError>;
}

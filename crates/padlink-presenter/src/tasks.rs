// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task board: the owner's saved control profiles.

use std::sync::Arc;

use padlink_core::PadlinkError;
use padlink_core::traits::StorageAdapter;
use padlink_core::types::{NewTask, Task};
use tracing::{error, info};

use crate::state::StateHolder;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskBoardState {
    pub tasks: Vec<Task>,
    /// Message of the most recent failed store call, cleared on success.
    pub last_error: Option<String>,
}

/// Projection of one owner's tasks. Every mutation refetches the list.
pub struct TaskBoard {
    owner_id: String,
    storage: Arc<dyn StorageAdapter>,
    state: StateHolder<TaskBoardState>,
}

impl TaskBoard {
    pub fn new(owner_id: impl Into<String>, storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            owner_id: owner_id.into(),
            storage,
            state: StateHolder::default(),
        }
    }

    pub fn state(&self) -> &StateHolder<TaskBoardState> {
        &self.state
    }

    /// Refetch the task list. A storage failure publishes an empty list.
    pub async fn refresh(&self) {
        match self.storage.list_tasks(&self.owner_id).await {
            Ok(tasks) => self.state.publish(TaskBoardState {
                tasks,
                last_error: None,
            }),
            Err(e) => self.fail(e),
        }
    }

    pub async fn add_task(&self, title: &str, actions: &[String]) -> Result<Task, PadlinkError> {
        let new = NewTask::new(self.owner_id.clone(), title).with_actions(actions);
        let task = self.storage.add_task(&new).await?;
        info!(task_id = task.id, title = %task.title, "task added");
        self.refresh().await;
        Ok(task)
    }

    /// Delete one task. Returns `false` when it was already gone.
    pub async fn delete_task(&self, id: i64) -> Result<bool, PadlinkError> {
        let removed = self.storage.delete_task(&self.owner_id, id).await?;
        info!(task_id = id, removed, "task deleted");
        self.refresh().await;
        Ok(removed)
    }

    /// Flip the enabled flag of a task in the current projection.
    pub async fn toggle(&self, id: i64) -> Result<bool, PadlinkError> {
        let current = self
            .state
            .snapshot()
            .tasks
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| PadlinkError::NotFound {
                kind: "task".into(),
                id: id.to_string(),
            })?;
        self.set_enabled(id, !current.enabled).await
    }

    pub async fn set_enabled(&self, id: i64, enabled: bool) -> Result<bool, PadlinkError> {
        let updated = self
            .storage
            .set_task_enabled(&self.owner_id, id, enabled)
            .await?;
        self.refresh().await;
        Ok(updated)
    }

    fn fail(&self, e: PadlinkError) {
        error!(owner_id = %self.owner_id, error = %e, "failed to load tasks");
        self.state.publish(TaskBoardState {
            tasks: Vec::new(),
            last_error: Some(e.to_string()),
        });
    }
}

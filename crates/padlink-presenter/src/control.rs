// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Joystick control session and saved-task playback.

use std::sync::Arc;

use padlink_core::PadlinkError;
use padlink_core::actions::ControlAction;
use padlink_core::traits::{CommandChannel, StorageAdapter};
use padlink_core::types::{History, Task};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::state::StateHolder;

/// Records every action sent during one joystick session.
///
/// `finish` turns the recording into a single history row.
pub struct ControlSession {
    channel: Arc<dyn CommandChannel>,
    storage: Arc<dyn StorageAdapter>,
    recorded: Mutex<Vec<String>>,
    state: StateHolder<Vec<String>>,
}

impl ControlSession {
    pub fn new(channel: Arc<dyn CommandChannel>, storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            channel,
            storage,
            recorded: Mutex::new(Vec::new()),
            state: StateHolder::default(),
        }
    }

    /// Codes recorded so far.
    pub fn state(&self) -> &StateHolder<Vec<String>> {
        &self.state
    }

    /// Send one action. It is only recorded once the channel accepted it.
    ///
    /// The recording lock is held across the send so concurrent callers are
    /// recorded in the order they reached the channel.
    pub async fn send(&self, action: ControlAction) -> Result<(), PadlinkError> {
        let code = action.code();
        let mut recorded = self.recorded.lock().await;
        self.channel.send_command(&code).await?;
        recorded.push(code);
        self.state.publish(recorded.clone());
        Ok(())
    }

    /// Persist the recording under `name` and reset. An empty session
    /// writes nothing and returns `None`.
    pub async fn finish(&self, name: &str) -> Result<Option<History>, PadlinkError> {
        let mut recorded = self.recorded.lock().await;
        if recorded.is_empty() {
            debug!(name, "empty control session, no history written");
            return Ok(None);
        }
        let history = self.storage.append_history(name, &recorded).await?;
        info!(name, actions = recorded.len(), history_id = history.id, "control session saved");
        recorded.clear();
        self.state.publish(Vec::new());
        Ok(Some(history))
    }
}

/// Replay a saved task over `channel`. Disabled tasks are skipped.
///
/// Returns the number of commands sent.
pub async fn run_task(channel: &dyn CommandChannel, task: &Task) -> Result<usize, PadlinkError> {
    if !task.enabled {
        debug!(task_id = task.id, "task disabled, skipping");
        return Ok(0);
    }
    for action in &task.actions {
        channel.send_command(action).await?;
    }
    info!(task_id = task.id, sent = task.actions.len(), "task executed");
    Ok(task.actions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use padlink_test_utils::{MockChannel, TestHarness};

    #[tokio::test]
    async fn session_records_and_finishes_into_one_history() {
        let harness = TestHarness::builder().build().await.unwrap();
        let session = ControlSession::new(harness.channel.clone(), harness.storage.clone());

        session.send(ControlAction::Forward).await.unwrap();
        session.send(ControlAction::Left).await.unwrap();
        session.send(ControlAction::Stop).await.unwrap();
        assert_eq!(session.state().snapshot(), vec!["F", "L", "S"]);

        let history = session.finish("Patrol").await.unwrap().unwrap();
        assert_eq!(history.actions, vec!["F", "L", "S"]);
        assert_eq!(harness.channel.commands().await, vec!["F", "L", "S"]);
        assert!(session.state().snapshot().is_empty());

        let all = harness.storage.list_histories().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].task_name, "Patrol");
    }

    #[tokio::test]
    async fn empty_session_writes_no_history() {
        let harness = TestHarness::builder().build().await.unwrap();
        let session = ControlSession::new(harness.channel.clone(), harness.storage.clone());
        assert!(session.finish("Nothing").await.unwrap().is_none());
        assert!(harness.storage.list_histories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_send_is_not_recorded() {
        let harness = TestHarness::builder().build().await.unwrap();
        let session = ControlSession::new(harness.channel.clone(), harness.storage.clone());
        harness.channel.set_failing(true);
        assert!(session.send(ControlAction::ButtonA).await.is_err());
        assert!(session.state().snapshot().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_sends_record_in_wire_order() {
        let harness = TestHarness::builder().build().await.unwrap();
        let session = Arc::new(ControlSession::new(
            harness.channel.clone(),
            harness.storage.clone(),
        ));
        let actions = [
            ControlAction::Forward,
            ControlAction::Backward,
            ControlAction::Left,
            ControlAction::Right,
            ControlAction::Stop,
        ];

        let handles: Vec<_> = (0..40)
            .map(|i| {
                let session = session.clone();
                let action = actions[i % actions.len()];
                tokio::spawn(async move { session.send(action).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let recorded = session.state().snapshot();
        assert_eq!(recorded.len(), 40);
        assert_eq!(recorded, harness.channel.commands().await);
    }

    fn task(enabled: bool) -> Task {
        Task {
            id: 1,
            owner_id: "alice".into(),
            title: "Dance".into(),
            enabled,
            actions: vec!["F".into(), "B".into(), "X".into()],
        }
    }

    #[tokio::test]
    async fn run_task_sends_actions_in_order() {
        let channel = MockChannel::new();
        assert_eq!(run_task(&channel, &task(true)).await.unwrap(), 3);
        assert_eq!(channel.commands().await, vec!["F", "B", "X"]);
    }

    #[tokio::test]
    async fn disabled_task_is_skipped() {
        let channel = MockChannel::new();
        assert_eq!(run_task(&channel, &task(false)).await.unwrap(), 0);
        assert!(channel.sent().await.is_empty());
    }
}

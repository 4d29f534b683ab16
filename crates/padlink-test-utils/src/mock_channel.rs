// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock command channel for deterministic testing.
//!
//! `MockChannel` implements `CommandChannel` and records everything sent
//! through it, in order, for assertion in tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use padlink_core::traits::{CommandChannel, PluginAdapter};
use padlink_core::types::{AdapterType, HealthStatus};
use padlink_core::PadlinkError;

/// One captured write to the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message(String),
    Command(String),
}

/// A mock command channel for testing.
#[derive(Default)]
pub struct MockChannel {
    sent: Arc<Mutex<Vec<Sent>>>,
    fail: AtomicBool,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail with a transport error.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<Sent> {
        self.sent.lock().await.clone()
    }

    /// Only the command codes, in send order.
    pub async fn commands(&self) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .filter_map(|s| match s {
                Sent::Command(c) => Some(c.clone()),
                Sent::Message(_) => None,
            })
            .collect()
    }

    /// Only the text messages, in send order.
    pub async fn messages(&self) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .filter_map(|s| match s {
                Sent::Message(m) => Some(m.clone()),
                Sent::Command(_) => None,
            })
            .collect()
    }

    async fn push(&self, item: Sent) -> Result<(), PadlinkError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PadlinkError::Transport {
                message: "mock channel is disconnected".into(),
                source: None,
            });
        }
        self.sent.lock().await.push(item);
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for MockChannel {
    fn name(&self) -> &str {
        "mock-channel"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Transport
    }

    async fn health_check(&self) -> Result<HealthStatus, PadlinkError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PadlinkError> {
        Ok(())
    }
}

#[async_trait]
impl CommandChannel for MockChannel {
    async fn send_message(&self, text: &str) -> Result<(), PadlinkError> {
        self.push(Sent::Message(text.to_string())).await
    }

    async fn send_command(&self, code: &str) -> Result<(), PadlinkError> {
        self.push(Sent::Command(code.to_string())).await
    }
}

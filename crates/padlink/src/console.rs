// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command channel that writes to stdout.
//!
//! Stands in for the Bluetooth link when driving the device from a terminal.

use async_trait::async_trait;
use padlink_core::PadlinkError;
use padlink_core::traits::{CommandChannel, PluginAdapter};
use padlink_core::types::{AdapterType, HealthStatus};
use tracing::debug;

pub struct ConsoleChannel;

#[async_trait]
impl PluginAdapter for ConsoleChannel {
    fn name(&self) -> &str {
        "console"
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
impl CommandChannel for ConsoleChannel {
    async fn send_message(&self, text: &str) -> Result<(), PadlinkError> {
        debug!(text, "message sent");
        println!("> {text}");
        Ok(())
    }

    async fn send_command(&self, code: &str) -> Result<(), PadlinkError> {
        debug!(code, "command sent");
        println!("> {code}");
        Ok(())
    }
}

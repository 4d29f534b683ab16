// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command channel to the paired microcontroller.

use async_trait::async_trait;

use crate::error::PadlinkError;
use crate::traits::adapter::PluginAdapter;

/// Fire-and-forget channel to the microcontroller.
///
/// Implementations own the connection lifecycle; callers only push text.
/// A successful return means the payload was handed to the transport, not
/// that the device acted on it.
#[async_trait]
pub trait CommandChannel: PluginAdapter {
    /// Sends a free-form text line.
    async fn send_message(&self, text: &str) -> Result<(), PadlinkError>;

    /// Sends a single command code (one joystick action).
    async fn send_command(&self, code: &str) -> Result<(), PadlinkError>;
}
